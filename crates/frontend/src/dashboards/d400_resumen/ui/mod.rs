pub mod dashboard;

pub use dashboard::ResumenDashboard;
