pub mod activation;
pub mod adhoc;
pub mod employees;
pub mod manual_reports;
pub mod reports;
pub mod submissions;
