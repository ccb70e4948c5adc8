//! Entity module - Contains all SeaORM entity definitions for both stores.
//!
//! The order store owns `user`, `cart_item`, `order`, and `order_item`; the
//! catalog store owns `product`. Each entity has a Model struct for data and an
//! Entity struct for operations. The two stores never share a connection, so
//! no relation crosses the store boundary - cart and order lines reference
//! catalog products by plain string id only.

pub mod cart_item;
pub mod order;
pub mod order_item;
pub mod product;
pub mod user;

// Re-export specific types to avoid conflicts
pub use cart_item::{Column as CartItemColumn, Entity as CartItem, Model as CartItemModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
