/// A named group of opaque documents, mounted under its own path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceCollection {
    Transactions,
    Budgets,
}

impl ResourceCollection {
    pub fn name(self) -> &'static str {
        match self {
            ResourceCollection::Transactions => "transactions",
            ResourceCollection::Budgets => "budgets",
        }
    }

    pub fn mount_path(self) -> &'static str {
        match self {
            ResourceCollection::Transactions => "/api/transactions",
            ResourceCollection::Budgets => "/api/budgets",
        }
    }

    /// Singular noun for messages.
    pub fn item(self) -> &'static str {
        match self {
            ResourceCollection::Transactions => "transaction",
            ResourceCollection::Budgets => "budget",
        }
    }
}
