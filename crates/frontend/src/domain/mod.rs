pub mod a001_product;
pub mod a002_adjustment;
pub mod a003_purchase;
pub mod a004_sale;
pub mod a005_debt;
pub mod a006_expense;
pub mod a007_account;
pub mod a008_device;
pub mod a009_message;
pub mod a010_user;
