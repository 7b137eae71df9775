pub mod food_items;
pub mod transactions;
pub mod users;

pub use food_items::Entity as FoodItems;
pub use transactions::Entity as Transactions;
pub use users::Entity as Users;
