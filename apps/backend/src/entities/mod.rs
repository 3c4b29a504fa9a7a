pub mod todos;
pub mod users;

pub use todos::Entity as Todos;
pub use todos::Model as Todo;
pub use users::Entity as Users;
pub use users::Model as User;
