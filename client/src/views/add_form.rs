//! Add-product form

use super::Notice;
use crate::api::CatalogApi;
use crate::models::{ImageFile, NewProduct, Product};

/// Form state for a new product
///
/// The entered fields survive a failed submission and are cleared after a
/// successful one.
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    fields: NewProduct,
    notice: Option<Notice>,
}

impl AddForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &NewProduct {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut NewProduct {
        &mut self.fields
    }

    pub fn add_image(&mut self, image: ImageFile) {
        self.fields.images.push(image);
    }

    /// Submit the form
    pub async fn submit(&mut self, api: &dyn CatalogApi) -> Option<Product> {
        match api.add_product(&self.fields).await {
            Ok(product) => {
                tracing::info!(id = %product.id, "Product added");
                self.fields = NewProduct::default();
                self.notice = Some(Notice::Success("Product added successfully!".to_string()));
                Some(product)
            }
            Err(e) => {
                tracing::error!("Error adding product: {:#}", e);
                self.notice = Some(Notice::Failure(format!("Failed to add product: {}", e)));
                None
            }
        }
    }

    /// The pending notice, cleared once taken
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeCatalog;

    fn filled_form() -> AddForm {
        let mut form = AddForm::new();
        let fields = form.fields_mut();
        fields.name = "Box".to_string();
        fields.length = "10".to_string();
        fields.breadth = "5".to_string();
        fields.height = "5".to_string();
        fields.price = "20".to_string();
        fields.stock = "3".to_string();
        form.add_image(ImageFile {
            file_name: "box.png".to_string(),
            bytes: vec![1, 2, 3],
        });
        form
    }

    #[tokio::test]
    async fn test_submit_success_resets_fields() {
        let api = FakeCatalog::new();
        let mut form = filled_form();

        let product = form.submit(&api).await.unwrap();

        assert_eq!(product.name, "Box");
        assert_eq!(product.images, vec!["/uploads/box.png".to_string()]);
        assert_eq!(form.fields(), &NewProduct::default());
        assert_eq!(api.submissions().len(), 1);
        assert_eq!(api.submissions()[0].price, "20");
        assert_eq!(
            form.take_notice(),
            Some(Notice::Success("Product added successfully!".to_string()))
        );
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_fields() {
        let api = FakeCatalog::new();
        api.set_failing(true);
        let mut form = filled_form();
        let before = form.fields().clone();

        assert!(form.submit(&api).await.is_none());

        assert_eq!(form.fields(), &before);
        let notice = form.take_notice().unwrap();
        assert!(!notice.is_success());
        assert!(notice.message().starts_with("Failed to add product"));
    }

    #[tokio::test]
    async fn test_notice_is_transient() {
        let api = FakeCatalog::new();
        let mut form = filled_form();
        form.submit(&api).await;

        assert!(form.take_notice().is_some());
        assert!(form.take_notice().is_none());
    }
}
