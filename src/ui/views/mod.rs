mod delete_dialog;
mod order_form;
mod product_form;
mod product_list;

pub use delete_dialog::DeleteDialog;
pub use order_form::OrderForm;
pub use product_form::{ProductForm, ProductFormMode};
pub use product_list::draw_product_list;
