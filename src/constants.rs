/// Capacity of the account-created event queue feeding the profile
/// provisioner.
pub const ACCOUNT_EVENT_QUEUE_DEPTH: usize = 64;
