pub mod catalog;
pub mod history;
pub mod inventory;
pub mod marketplace;
pub mod me;
pub mod spoons;
pub mod yard;
