mod agents;
mod audit;
mod finance;
mod inventory;

pub use agents::AgentsPage;
pub use audit::AuditPage;
pub use finance::FinancePage;
pub use inventory::InventoryPage;
