pub mod chat;
pub mod login;
pub mod shared;

pub use chat::ChatView;
pub use login::LoginView;
