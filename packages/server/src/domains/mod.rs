// Business domains
pub mod ledger;
pub mod notifications;
pub mod quests;
pub mod review;
pub mod roles;
