use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

use crate::errors::ModelError;

/// One catalog entry as it is stored in the JSON file.
///
/// `price` and `stock` stay as [`Number`] so integers written as `10` are
/// re-written as `10`, not `10.0`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: Number,
    pub thumbnail: String,
    pub code: String,
    pub stock: Number,
}

/// The user-supplied fields of a product, in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Price,
    Thumbnail,
    Code,
    Stock,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Price => "price",
            Field::Thumbnail => "thumbnail",
            Field::Code => "code",
            Field::Stock => "stock",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a float into a JSON number, keeping whole values integral.
/// Returns `None` for NaN and infinities, which JSON cannot carry.
pub fn number(value: f64) -> Option<Number> {
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Some(Number::from(value as i64))
    } else {
        Number::from_f64(value)
    }
}

pub fn text_is_truthy(value: &str) -> bool {
    !value.is_empty()
}

/// `0` is falsy unless `reject_zero` is off; a missing number never passes.
pub fn number_is_truthy(value: &Number, reject_zero: bool) -> bool {
    match value.as_f64() {
        Some(v) if v.is_nan() => false,
        Some(v) => !(reject_zero && v == 0.0),
        None => false,
    }
}

/// Insert candidate. Every field must be present and truthy.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Number>,
    pub thumbnail: Option<String>,
    pub code: Option<String>,
    pub stock: Option<Number>,
}

impl NewProduct {
    /// Positional constructor mirroring `addProduct(title, description, price, thumbnail, code, stock)`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        thumbnail: impl Into<String>,
        code: impl Into<String>,
        stock: f64,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            price: number(price),
            thumbnail: Some(thumbnail.into()),
            code: Some(code.into()),
            stock: number(stock),
        }
    }

    /// First field that is absent, `null` or falsy.
    pub fn first_falsy(&self, reject_zero: bool) -> Option<Field> {
        let text = |v: &Option<String>| v.as_deref().is_some_and(text_is_truthy);
        let num = |v: &Option<Number>| v.as_ref().is_some_and(|n| number_is_truthy(n, reject_zero));

        if !text(&self.title) {
            Some(Field::Title)
        } else if !text(&self.description) {
            Some(Field::Description)
        } else if !num(&self.price) {
            Some(Field::Price)
        } else if !text(&self.thumbnail) {
            Some(Field::Thumbnail)
        } else if !text(&self.code) {
            Some(Field::Code)
        } else if !num(&self.stock) {
            Some(Field::Stock)
        } else {
            None
        }
    }

    pub fn into_product(self, id: u64) -> Result<Product, ModelError> {
        Ok(Product {
            id,
            title: self.title.ok_or(ModelError::Missing(Field::Title))?,
            description: self.description.ok_or(ModelError::Missing(Field::Description))?,
            price: self.price.ok_or(ModelError::Missing(Field::Price))?,
            thumbnail: self.thumbnail.ok_or(ModelError::Missing(Field::Thumbnail))?,
            code: self.code.ok_or(ModelError::Missing(Field::Code))?,
            stock: self.stock.ok_or(ModelError::Missing(Field::Stock))?,
        })
    }
}

// Distinguishes `"field": null` (Some(None)) from an absent field (None).
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Partial update. Outer `None` means "leave as is", `Some(None)` is an
/// explicit `null` and is rejected as a missing value.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProductPatch {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub price: Option<Option<Number>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub code: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub stock: Option<Option<Number>>,
}

impl ProductPatch {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Some(title.into()));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(number(price));
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(Some(thumbnail.into()));
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(Some(code.into()));
        self
    }

    pub fn with_stock(mut self, stock: f64) -> Self {
        self.stock = Some(number(stock));
        self
    }

    /// The supplied `code`, if the patch carries a non-null one.
    pub fn code(&self) -> Option<&str> {
        self.code.as_ref().and_then(|c| c.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// First supplied field whose value is `null` or falsy. Absent fields are not checked.
    pub fn first_falsy(&self, reject_zero: bool) -> Option<Field> {
        let text = |v: &Option<Option<String>>| match v {
            None => true,
            Some(inner) => inner.as_deref().is_some_and(text_is_truthy),
        };
        let num = |v: &Option<Option<Number>>| match v {
            None => true,
            Some(inner) => inner.as_ref().is_some_and(|n| number_is_truthy(n, reject_zero)),
        };

        if !text(&self.title) {
            Some(Field::Title)
        } else if !text(&self.description) {
            Some(Field::Description)
        } else if !num(&self.price) {
            Some(Field::Price)
        } else if !text(&self.thumbnail) {
            Some(Field::Thumbnail)
        } else if !text(&self.code) {
            Some(Field::Code)
        } else if !num(&self.stock) {
            Some(Field::Stock)
        } else {
            None
        }
    }

    /// Overwrite every supplied field on `product`; `id` is never touched.
    /// Explicit nulls are skipped since validation rejects them first.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(Some(v)) = self.title {
            product.title = v;
        }
        if let Some(Some(v)) = self.description {
            product.description = v;
        }
        if let Some(Some(v)) = self.price {
            product.price = v;
        }
        if let Some(Some(v)) = self.thumbnail {
            product.thumbnail = v;
        }
        if let Some(Some(v)) = self.code {
            product.code = v;
        }
        if let Some(Some(v)) = self.stock {
            product.stock = v;
        }
    }
}
