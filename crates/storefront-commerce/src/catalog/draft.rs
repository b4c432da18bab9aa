//! Admin product drafts and their multipart field encoding.

use crate::catalog::{Product, DEFAULT_COLOUR, DEFAULT_SIZE};
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Shared field name for every uploaded product image.
pub const IMAGE_FIELD: &str = "productImages";

/// An image file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// File contents.
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Create an image file, guessing the MIME type from the extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// One field of an encoded draft, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftField<'a> {
    /// A text field.
    Text { name: &'static str, value: String },
    /// An image file under [`IMAGE_FIELD`].
    Image(&'a ImageFile),
}

impl DraftField<'_> {
    /// The form field name.
    pub fn name(&self) -> &'static str {
        match self {
            DraftField::Text { name, .. } => name,
            DraftField::Image(_) => IMAGE_FIELD,
        }
    }
}

/// Product fields submitted by the admin create and edit forms.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    /// `None` is sent as an empty `category`, which clears it on update.
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub sizes: Vec<String>,
    pub colours: Vec<String>,
    pub in_stock: bool,
    pub total_stock: i64,
    pub is_trending: bool,
    /// New images to attach.
    pub images: Vec<ImageFile>,
    /// Existing image URLs to detach (edit only).
    pub images_to_remove: Vec<String>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: 0.0,
            category: None,
            tags: Vec::new(),
            sizes: vec![DEFAULT_SIZE.to_string()],
            colours: vec![DEFAULT_COLOUR.to_string()],
            in_stock: true,
            total_stock: 0,
            is_trending: false,
            images: Vec::new(),
            images_to_remove: Vec::new(),
        }
    }
}

impl ProductDraft {
    /// Create a draft with the form defaults.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    /// Prefill an edit form from an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price,
            category: product
                .category
                .as_ref()
                .map(|c| c.form_value().to_string())
                .filter(|c| !c.is_empty()),
            tags: product.tags.clone(),
            sizes: product.size.clone(),
            colours: product.colour_options(),
            in_stock: product.in_stock.unwrap_or(product.total_stock > 0),
            total_stock: product.total_stock,
            is_trending: product.is_trending,
            images: Vec::new(),
            images_to_remove: Vec::new(),
        }
    }

    /// Split a comma-separated tag input into trimmed, non-empty tags.
    pub fn parse_tags(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }

    /// Check the draft before it is sent.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.name.trim().is_empty() {
            return Err(CommerceError::ValidationError(
                "product name is required".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CommerceError::ValidationError(format!(
                "invalid price: {}",
                self.price
            )));
        }
        if self.total_stock < 0 {
            return Err(CommerceError::InvalidQuantity(self.total_stock));
        }
        Ok(())
    }

    /// Encode the draft as ordered multipart fields.
    ///
    /// Array fields repeat once per element under a `name[]` field; an empty list is
    /// sent as a single blank `name[]` so an update can clear it. `category` is always
    /// present, blank when unset. Images repeat under the shared [`IMAGE_FIELD`] name.
    /// These names are what the remote API expects.
    pub fn form_fields(&self) -> Vec<DraftField<'_>> {
        let mut fields = vec![
            text("name", self.name.clone()),
            text("description", self.description.clone()),
            text("price", self.price.to_string()),
            text("category", self.category.clone().unwrap_or_default()),
        ];

        push_list(&mut fields, "tags[]", &self.tags);
        push_list(&mut fields, "size[]", &self.sizes);
        push_list(&mut fields, "colours[]", &self.colours);

        fields.push(text("inStock", self.in_stock.to_string()));
        fields.push(text("totalStock", self.total_stock.to_string()));
        fields.push(text("isTrending", self.is_trending.to_string()));

        fields.extend(
            self.images_to_remove
                .iter()
                .map(|url| text("imagesToRemove[]", url.clone())),
        );
        fields.extend(self.images.iter().map(DraftField::Image));
        fields
    }
}

fn text(name: &'static str, value: String) -> DraftField<'static> {
    DraftField::Text { name, value }
}

fn push_list(fields: &mut Vec<DraftField<'_>>, name: &'static str, values: &[String]) {
    if values.is_empty() {
        fields.push(text(name, String::new()));
    } else {
        fields.extend(values.iter().map(|v| text(name, v.clone())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(fields: &[DraftField<'_>]) -> Vec<&'static str> {
        fields.iter().map(DraftField::name).collect()
    }

    #[test]
    fn test_array_fields_repeat_with_brackets() {
        let mut draft = ProductDraft::new("Hoodie", 49.0);
        draft.tags = vec!["winter".into(), "cotton".into()];
        draft.sizes = vec!["sm".into(), "lg".into()];
        draft.colours = vec!["grey".into()];

        let fields = draft.form_fields();
        let names = names(&fields);
        assert_eq!(names.iter().filter(|n| **n == "tags[]").count(), 2);
        assert_eq!(names.iter().filter(|n| **n == "size[]").count(), 2);
        assert_eq!(names.iter().filter(|n| **n == "colours[]").count(), 1);
        assert!(!names.contains(&"tags"));
    }

    #[test]
    fn test_images_share_one_field_name() {
        let mut draft = ProductDraft::new("Poster", 12.0);
        draft.images = vec![
            ImageFile::new("front.png", vec![1, 2]),
            ImageFile::new("back.JPG", vec![3]),
        ];

        let fields = draft.form_fields();
        let images: Vec<_> = fields
            .iter()
            .filter_map(|f| match f {
                DraftField::Image(img) => Some(img),
                _ => None,
            })
            .collect();
        assert_eq!(images.len(), 2);
        assert_eq!(images[1].content_type, "image/jpeg");
        assert_eq!(
            names(&fields).iter().filter(|n| **n == IMAGE_FIELD).count(),
            2
        );
    }

    #[test]
    fn test_scalar_rendering() {
        let mut draft = ProductDraft::new("Lamp", 20.0);
        draft.total_stock = 7;
        draft.is_trending = true;

        let fields = draft.form_fields();
        assert!(fields.contains(&DraftField::Text {
            name: "price",
            value: "20".to_string()
        }));
        assert!(fields.contains(&DraftField::Text {
            name: "isTrending",
            value: "true".to_string()
        }));
        assert!(fields.contains(&DraftField::Text {
            name: "totalStock",
            value: "7".to_string()
        }));
    }

    #[test]
    fn test_cleared_fields_still_sent() {
        let mut draft = ProductDraft::new("Lamp", 20.0);
        draft.sizes.clear();
        draft.colours.clear();

        let fields = draft.form_fields();
        for name in ["category", "tags[]", "size[]", "colours[]"] {
            assert!(
                fields.contains(&DraftField::Text {
                    name,
                    value: String::new()
                }),
                "{} missing",
                name
            );
        }
        assert!(!names(&fields).contains(&"imagesToRemove[]"));
    }

    #[test]
    fn test_category_sent_when_set() {
        let mut draft = ProductDraft::new("Lamp", 20.0);
        draft.category = Some("home".into());
        assert!(draft.form_fields().contains(&DraftField::Text {
            name: "category",
            value: "home".to_string()
        }));
    }

    #[test]
    fn test_from_product_uses_category_id() {
        let product: Product = serde_json::from_str(
            r#"{"_id": "p1", "name": "Hat", "category": {"_id": "c1", "name": "Hats"}}"#,
        )
        .unwrap();
        let draft = ProductDraft::from_product(&product);
        assert_eq!(draft.category.as_deref(), Some("c1"));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(
            ProductDraft::parse_tags(" summer, ,sale ,"),
            vec!["summer".to_string(), "sale".to_string()]
        );
    }

    #[test]
    fn test_validate() {
        assert!(ProductDraft::new("", 1.0).validate().is_err());
        assert!(ProductDraft::new("Cap", -1.0).validate().is_err());
        assert!(ProductDraft::new("Cap", f64::NAN).validate().is_err());
        assert!(ProductDraft::new("Cap", 15.0).validate().is_ok());
    }
}
