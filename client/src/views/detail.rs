//! Product detail view with an inline edit form

use std::fmt::Write;

use anyhow::Result;

use super::{format_size, Notice};
use crate::api::CatalogApi;
use crate::models::{Category, Dimensions, Product, ProductPatch};

/// Editable copy of a product's fields
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub name: String,
    pub size: Option<Dimensions>,
    pub category: Category,
    pub price: f64,
    pub stock: u32,
}

impl EditForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            size: product.size,
            category: product.category,
            price: product.price,
            stock: product.stock,
        }
    }

    /// Fields that differ from `product`
    pub fn changes_from(&self, product: &Product) -> ProductPatch {
        ProductPatch {
            name: (self.name != product.name).then(|| self.name.clone()),
            size: (self.size != product.size).then_some(self.size),
            category: (self.category != product.category).then_some(self.category),
            price: (self.price != product.price).then_some(self.price),
            stock: (self.stock != product.stock).then_some(self.stock),
        }
    }
}

/// One product, optionally in edit mode
#[derive(Debug, Clone)]
pub struct DetailView {
    product: Product,
    editing: Option<EditForm>,
    notice: Option<Notice>,
}

impl DetailView {
    pub async fn load(api: &dyn CatalogApi, id: &str) -> Result<Self> {
        let product = api.get_product(id).await?;
        Ok(Self {
            product,
            editing: None,
            notice: None,
        })
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Enter edit mode with a form prefilled from the product, or cancel it
    pub fn toggle_edit(&mut self) {
        self.editing = match self.editing {
            Some(_) => None,
            None => Some(EditForm::from_product(&self.product)),
        };
    }

    pub fn form_mut(&mut self) -> Option<&mut EditForm> {
        self.editing.as_mut()
    }

    /// Send the changed fields and adopt the server's record
    ///
    /// Returns whether the view left edit mode. Nothing is sent when no
    /// field changed.
    pub async fn submit(&mut self, api: &dyn CatalogApi) -> bool {
        let Some(form) = &self.editing else {
            return false;
        };

        let patch = form.changes_from(&self.product);
        if patch.is_empty() {
            self.editing = None;
            return true;
        }

        match api.update_product(&self.product.id, &patch).await {
            Ok(updated) => {
                tracing::info!(id = %updated.id, "Product updated");
                self.product = updated;
                self.editing = None;
                self.notice = Some(Notice::Success("Product updated successfully!".to_string()));
                true
            }
            Err(e) => {
                tracing::error!("Error updating product {}: {:#}", self.product.id, e);
                self.notice = Some(Notice::Failure(format!("Failed to update product: {}", e)));
                false
            }
        }
    }

    /// The pending notice, cleared once taken
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn render(&self, api: &dyn CatalogApi) -> String {
        let product = &self.product;
        let mut out = String::new();

        let _ = writeln!(out, "{}", product.name);
        let _ = writeln!(out, "  ID:    {}", product.id);
        let _ = writeln!(out, "  Price: {}", product.price);
        let _ = writeln!(out, "  Stock: {}", product.stock);
        let _ = writeln!(out, "  Size:  {}", format_size(product.size.as_ref()));
        let _ = writeln!(out, "  Type:  {}", capitalize(&product.category.to_string()));
        let _ = writeln!(out, "  Images:");
        for path in &product.images {
            let _ = writeln!(out, "    {}", api.image_url(path));
        }
        out
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
