pub mod category;
pub mod task;
pub mod user;

pub use category::{Category, CategoryChanges, CategoryWithCount};
pub use task::{
    Task, TaskChanges, TaskDetail, TaskPriority, TaskStatistics, TaskStatus, TaskSummary,
};
pub use user::{NewUser, User, UserChanges, UserRecord, UserWithTasks};
