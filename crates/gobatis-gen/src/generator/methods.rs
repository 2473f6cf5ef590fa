//! The DAO method catalog.
//!
//! Both the Go interface and the mapper XML are rendered from this one list,
//! so every interface method has exactly one mapper statement with the same
//! id.

/// What a DAO method does; aliases share an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Insert,
    InsertBatch,
    SelectByKey,
    SelectAll,
    SelectPage,
    SelectByCondition,
    Count,
    CountByCondition,
    ExistsByKey,
    UpdateByKey,
    UpdateByCondition,
    DeleteByKey,
    DeleteByKeys,
    DeleteByCondition,
    SelectByExample,
    CountByExample,
    UpdateByExample,
    DeleteByExample,
}

impl Operation {
    /// Operations that only exist when the table has a primary key.
    pub fn needs_key(self) -> bool {
        matches!(
            self,
            Operation::SelectByKey
                | Operation::ExistsByKey
                | Operation::UpdateByKey
                | Operation::DeleteByKey
                | Operation::DeleteByKeys
        )
    }

    /// Operations taking an `*example.Example` filter predicate.
    pub fn needs_example(self) -> bool {
        matches!(
            self,
            Operation::SelectByExample
                | Operation::CountByExample
                | Operation::UpdateByExample
                | Operation::DeleteByExample
        )
    }

    /// Mapper statement element.
    pub fn statement_tag(self) -> &'static str {
        match self {
            Operation::Insert | Operation::InsertBatch => "insert",
            Operation::UpdateByKey | Operation::UpdateByCondition | Operation::UpdateByExample => {
                "update"
            }
            Operation::DeleteByKey
            | Operation::DeleteByKeys
            | Operation::DeleteByCondition
            | Operation::DeleteByExample => "delete",
            _ => "select",
        }
    }

    /// Godoc sentence fragment following the method name.
    pub fn doc(self) -> &'static str {
        match self {
            Operation::Insert => "inserts one record and returns the affected row count.",
            Operation::InsertBatch => "inserts several records in one statement.",
            Operation::SelectByKey => "returns the record with the given primary key.",
            Operation::SelectAll => "returns every record.",
            Operation::SelectPage => "returns up to limit records starting at offset.",
            Operation::SelectByCondition => "returns the records matching every condition entry.",
            Operation::Count => "returns the total number of records.",
            Operation::CountByCondition => "counts the records matching every condition entry.",
            Operation::ExistsByKey => "reports whether a record with the given primary key exists.",
            Operation::UpdateByKey => "updates the record identified by its primary key.",
            Operation::UpdateByCondition => "updates the records matching every condition entry.",
            Operation::DeleteByKey => "deletes the record with the given primary key.",
            Operation::DeleteByKeys => "deletes the records with the given primary keys.",
            Operation::DeleteByCondition => "deletes the records matching every condition entry.",
            Operation::SelectByExample => "returns the records matching the example criteria.",
            Operation::CountByExample => "counts the records matching the example criteria.",
            Operation::UpdateByExample => "updates the records matching the example criteria.",
            Operation::DeleteByExample => "deletes the records matching the example criteria.",
        }
    }
}

/// One named DAO method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaoMethod {
    pub name: &'static str,
    pub operation: Operation,
}

const CATALOG: &[(&str, Operation)] = &[
    ("Insert", Operation::Insert),
    ("InsertBatch", Operation::InsertBatch),
    ("Add", Operation::Insert),
    ("Create", Operation::Insert),
    ("Save", Operation::Insert),
    ("GetById", Operation::SelectByKey),
    ("FindById", Operation::SelectByKey),
    ("SelectById", Operation::SelectByKey),
    ("GetAll", Operation::SelectAll),
    ("FindAll", Operation::SelectAll),
    ("SelectAll", Operation::SelectAll),
    ("ListAll", Operation::SelectAll),
    ("QueryAll", Operation::SelectAll),
    ("GetByPage", Operation::SelectPage),
    ("FindByPage", Operation::SelectPage),
    ("SelectByPage", Operation::SelectPage),
    ("GetByCondition", Operation::SelectByCondition),
    ("FindByCondition", Operation::SelectByCondition),
    ("SelectByCondition", Operation::SelectByCondition),
    ("QueryByCondition", Operation::SelectByCondition),
    ("GetCount", Operation::Count),
    ("Count", Operation::Count),
    ("CountByCondition", Operation::CountByCondition),
    ("ExistsById", Operation::ExistsByKey),
    ("GetExistsById", Operation::ExistsByKey),
    ("UpdateById", Operation::UpdateByKey),
    ("ModifyById", Operation::UpdateByKey),
    ("EditById", Operation::UpdateByKey),
    ("UpdateByCondition", Operation::UpdateByCondition),
    ("DeleteById", Operation::DeleteByKey),
    ("RemoveById", Operation::DeleteByKey),
    ("DeleteByIds", Operation::DeleteByKeys),
    ("RemoveByIds", Operation::DeleteByKeys),
    ("DeleteByCondition", Operation::DeleteByCondition),
    ("RemoveByCondition", Operation::DeleteByCondition),
    ("GetByExample", Operation::SelectByExample),
    ("FindByExample", Operation::SelectByExample),
    ("SelectByExample", Operation::SelectByExample),
    ("QueryByExample", Operation::SelectByExample),
    ("ListByExample", Operation::SelectByExample),
    ("CountByExample", Operation::CountByExample),
    ("UpdateByExample", Operation::UpdateByExample),
    ("ModifyByExample", Operation::UpdateByExample),
    ("EditByExample", Operation::UpdateByExample),
    ("DeleteByExample", Operation::DeleteByExample),
    ("RemoveByExample", Operation::DeleteByExample),
];

/// Methods a table gets, in declaration order.
pub fn method_surface(has_key: bool, with_example: bool) -> Vec<DaoMethod> {
    CATALOG
        .iter()
        .filter(|(_, op)| has_key || !op.needs_key())
        .filter(|(_, op)| with_example || !op.needs_example())
        .map(|&(name, operation)| DaoMethod { name, operation })
        .collect()
}

/// Names of the methods backed by `operation`, joined with `, `.
pub fn method_names(methods: &[DaoMethod], operation: Operation) -> String {
    methods
        .iter()
        .filter(|m| m.operation == operation)
        .map(|m| m.name)
        .collect::<Vec<_>>()
        .join(", ")
}
