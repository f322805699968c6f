//! Domain types for the Pomade marketplace.

mod email;
mod id;
mod money;
mod records;
mod role;

pub use email::{Email, EmailError};
pub use id::{CommissionId, OrderId, ProductId, UserId};
pub use money::Amount;
pub use records::{
    AuthResponse, Cart, CartItem, CartTotals, Commission, CommissionStatus, NewOrder, NewOrderItem,
    NewUser, Order, OrderItem, OrderStatus, PaymentMethod, Product, UserRecord,
};
pub use role::Role;
