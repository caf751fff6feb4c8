pub use super::titles::Entity as Titles;
