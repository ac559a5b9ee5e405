mod account;
mod chat;
mod generators;
mod toast;

pub use account::Account;
pub use chat::ChatWidget;
pub use generators::{BuilderPanel, MarketerPanel, TeacherPanel, WriterPanel};
pub use toast::Toast;
