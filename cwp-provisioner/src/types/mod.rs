//! 类型定义模块

mod account;
mod schema;

pub use account::{
    AccountIdentity, AccountSpec, OrderContext, STANDARD_PACKAGE_SENTINEL, USERNAME_FIELD,
};
pub use schema::{
    ConfigField, ConfigOption, ExtensionMetadata, FieldType, PackageCatalog, PackageOption,
};

// Re-export panel 库的公共类型
pub use cwp_panel::PanelCredentials;
