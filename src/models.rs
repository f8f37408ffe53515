use serde::{Deserialize, Deserializer, Serialize};
use crate::db::models::{
    first_photo, second_photo, Customer, NewCustomer, NewShippingAddress, Order, OrderLine,
    Product, ProductImage, UpdateProduct,
};
use crate::db::models::{cart_total_price, cart_total_quantity};
use crate::error::AppError;
use crate::slug::{is_blank, is_valid_slug, SLUG_MAX};

#[derive(Debug, Serialize, Deserialize)]
pub struct TitleRequest {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub descr: String,
    pub price: i32,
    pub quantity: i32,
    #[serde(default = "default_available")]
    pub is_available: bool,
    pub category_id: i32,
    #[serde(default)]
    pub brand_id: Option<i32>,
    #[serde(default)]
    pub slug: Option<String>,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub descr: Option<String>,
    pub price: Option<i32>,
    pub quantity: Option<i32>,
    pub is_available: Option<bool>,
    pub category_id: Option<i32>,
    /// Absent leaves the brand alone; `null` detaches it.
    #[serde(default, deserialize_with = "present")]
    pub brand_id: Option<Option<i32>>,
    pub slug: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateProductRequest> for UpdateProduct {
    fn from(req: UpdateProductRequest) -> Self {
        UpdateProduct {
            title: req.title,
            descr: req.descr,
            price: req.price,
            quantity: req.quantity,
            is_available: req.is_available,
            category_id: req.category_id,
            brand_id: req.brand_id,
            slug: req.slug,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub available: Option<bool>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
    pub search_term: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub transaction_id: String,
    #[serde(default)]
    pub shipping: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddOrderProductRequest {
    pub product_id: i32,
    #[serde(default)]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct ImageView {
    pub id: i32,
    pub url: Option<String>,
}

/// A product with its resolved photo URLs.
#[derive(Debug, Serialize)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub url: String,
    pub first_photo: String,
    pub second_photo: String,
    pub images: Vec<ImageView>,
}

impl ProductDetails {
    pub fn new(product: Product, images: &[ProductImage], media_url: &str) -> Self {
        ProductDetails {
            url: product.absolute_url(),
            first_photo: first_photo(images, media_url),
            second_photo: second_photo(images, media_url),
            images: images
                .iter()
                .map(|img| ImageView { id: img.id, url: img.url(media_url) })
                .collect(),
            product,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderLineView {
    #[serde(flatten)]
    pub line: OrderLine,
    pub total_price: i64,
}

/// An order with its line items and cart totals, computed at read time.
#[derive(Debug, Serialize)]
pub struct OrderSummary {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderLineView>,
    pub total_quantity: i64,
    pub total_price: i64,
}

impl OrderSummary {
    pub fn new(order: Order, lines: Vec<OrderLine>) -> Self {
        let total_quantity = cart_total_quantity(&lines);
        let total_price = cart_total_price(&lines);
        OrderSummary {
            order,
            items: lines
                .into_iter()
                .map(|line| OrderLineView { total_price: line.total_price(), line })
                .collect(),
            total_quantity,
            total_price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerView {
    #[serde(flatten)]
    pub customer: Customer,
    pub full_name: String,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        let full_name = format!("{} {}", customer.firstname, customer.lastname);
        CustomerView { customer, full_name }
    }
}

const TITLE_MAX: usize = 150;
const PHONE_MAX: usize = 15;

fn require_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} cannot be empty")));
    }
    if value.chars().count() > max {
        return Err(AppError::validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: i32) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

/// A blank slug is derived later; anything else must already be URL-safe.
fn validate_slug(slug: Option<&str>) -> Result<(), AppError> {
    match slug {
        Some(slug) if !is_blank(Some(slug)) && !is_valid_slug(slug) => Err(AppError::validation(format!(
            "slug may contain only letters, digits, hyphens and underscores, up to {SLUG_MAX} characters"
        ))),
        _ => Ok(()),
    }
}

pub fn validate_title(req: &TitleRequest) -> Result<(), AppError> {
    require_text("title", &req.title, TITLE_MAX)?;
    validate_slug(req.slug.as_deref())
}

pub fn validate_product(product: &CreateProductRequest) -> Result<(), AppError> {
    require_text("title", &product.title, TITLE_MAX)?;
    if product.descr.trim().is_empty() {
        return Err(AppError::validation("descr cannot be empty"));
    }
    require_non_negative("price", product.price)?;
    require_non_negative("quantity", product.quantity)?;
    if product.category_id <= 0 {
        return Err(AppError::validation("Invalid category ID"));
    }
    validate_slug(product.slug.as_deref())
}

pub fn validate_product_update(update: &UpdateProductRequest) -> Result<(), AppError> {
    if let Some(title) = &update.title {
        require_text("title", title, TITLE_MAX)?;
    }
    if let Some(descr) = &update.descr {
        if descr.trim().is_empty() {
            return Err(AppError::validation("descr cannot be empty"));
        }
    }
    if let Some(price) = update.price {
        require_non_negative("price", price)?;
    }
    if let Some(quantity) = update.quantity {
        require_non_negative("quantity", quantity)?;
    }
    validate_slug(update.slug.as_deref())
}

pub fn validate_order(order: &CreateOrderRequest) -> Result<(), AppError> {
    require_text("transaction_id", &order.transaction_id, TITLE_MAX)
}

pub fn validate_customer(customer: &NewCustomer) -> Result<(), AppError> {
    require_text("firstname", &customer.firstname, TITLE_MAX)?;
    require_text("lastname", &customer.lastname, TITLE_MAX)?;
    require_text("company_name", &customer.company_name, TITLE_MAX)?;
    require_text("email", &customer.email, 254)?;
    let email = customer.email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::validation("email is not a valid address")),
    }
}

pub fn validate_shipping_address(addr: &NewShippingAddress) -> Result<(), AppError> {
    require_text("country", &addr.country, TITLE_MAX)?;
    require_text("address", &addr.address, TITLE_MAX)?;
    require_text("town", &addr.town, TITLE_MAX)?;
    require_text("zip_code", &addr.zip_code, TITLE_MAX)?;
    require_text("phone", &addr.phone, PHONE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::db::models::OrderProduct;

    fn product_request() -> CreateProductRequest {
        CreateProductRequest {
            title: "Phone".to_string(),
            descr: "A phone".to_string(),
            price: 500,
            quantity: 3,
            is_available: true,
            category_id: 1,
            brand_id: None,
            slug: None,
        }
    }

    fn address() -> NewShippingAddress {
        NewShippingAddress {
            country: "Kazakhstan".to_string(),
            address: "Abay 1".to_string(),
            town: "Almaty".to_string(),
            zip_code: "050000".to_string(),
            phone: "+77011234567".to_string(),
            comment: None,
            customer_id: None,
            order_id: None,
        }
    }

    #[test]
    fn product_validation() {
        assert!(validate_product(&product_request()).is_ok());

        let mut blank = product_request();
        blank.title = "   ".to_string();
        assert!(validate_product(&blank).is_err());

        let mut negative = product_request();
        negative.price = -1;
        assert!(validate_product(&negative).is_err());

        let mut long = product_request();
        long.title = "x".repeat(151);
        assert!(validate_product(&long).is_err());
    }

    #[test]
    fn explicit_slugs_are_checked() {
        let title = |slug: &str| TitleRequest { title: "Big Sale".to_string(), slug: Some(slug.to_string()) };
        assert!(validate_title(&title("big-sale_2024")).is_ok());
        assert!(validate_title(&title("   ")).is_ok());
        assert!(validate_title(&title("Big Sale/2024 ?")).is_err());
        assert!(validate_title(&title(&"s".repeat(256))).is_err());

        let mut product = product_request();
        product.slug = Some("phone?".to_string());
        assert!(validate_product(&product).is_err());

        let update = UpdateProductRequest { slug: Some("a/b".to_string()), ..Default::default() };
        assert!(validate_product_update(&update).is_err());
        let update = UpdateProductRequest { slug: Some(String::new()), ..Default::default() };
        assert!(validate_product_update(&update).is_ok());
    }

    #[test]
    fn update_request_distinguishes_null_brand_from_missing() {
        let missing: UpdateProductRequest = serde_json::from_str(r#"{"price": 10}"#).unwrap();
        assert_eq!(missing.brand_id, None);

        let cleared: UpdateProductRequest = serde_json::from_str(r#"{"brand_id": null}"#).unwrap();
        assert_eq!(cleared.brand_id, Some(None));

        let set: UpdateProductRequest = serde_json::from_str(r#"{"brand_id": 4}"#).unwrap();
        assert_eq!(set.brand_id, Some(Some(4)));
    }

    #[test]
    fn create_product_defaults_to_available() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"title":"T","descr":"D","price":1,"quantity":1,"category_id":2}"#,
        )
        .unwrap();
        assert!(req.is_available);
        assert_eq!(req.slug, None);
    }

    #[test]
    fn customer_email_must_look_like_an_address() {
        let mut customer = NewCustomer {
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            company_name: "Engines Ltd".to_string(),
        };
        assert!(validate_customer(&customer).is_ok());
        customer.email = "not-an-email".to_string();
        assert!(validate_customer(&customer).is_err());
    }

    #[test]
    fn phone_is_limited_to_fifteen_characters() {
        assert!(validate_shipping_address(&address()).is_ok());
        let mut addr = address();
        addr.phone = "1234567890123456".to_string();
        assert!(validate_shipping_address(&addr).is_err());
    }

    #[test]
    fn order_summary_reports_totals() {
        let added_at = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let order = Order {
            id: 9,
            user_id: None,
            order_date: added_at,
            transaction_id: "tx-1".to_string(),
            shipping: false,
        };
        let product = Product {
            id: 1,
            title: "Phone".to_string(),
            descr: "A phone".to_string(),
            price: 120,
            quantity: 5,
            is_available: true,
            category_id: 1,
            brand_id: None,
            slug: "phone".to_string(),
        };
        let line = OrderLine {
            item: OrderProduct { id: 1, order_id: Some(9), product_id: Some(1), quantity: 2, added_at },
            product: Some(product),
        };

        let summary = OrderSummary::new(order, vec![line]);
        assert_eq!(summary.total_quantity, 2);
        assert_eq!(summary.total_price, 240);
        assert_eq!(summary.items[0].total_price, 240);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["transaction_id"], "tx-1");
        assert_eq!(json["items"][0]["product"]["title"], "Phone");
    }

    #[test]
    fn product_details_resolve_photos() {
        let product = Product {
            id: 3,
            title: "Lamp".to_string(),
            descr: "Bright".to_string(),
            price: 40,
            quantity: 1,
            is_available: true,
            category_id: 1,
            brand_id: None,
            slug: "lamp".to_string(),
        };
        let images = vec![ProductImage { id: 1, photo: Some("products/lamp.jpg".to_string()), product_id: 3 }];
        let details = ProductDetails::new(product, &images, "/media/");
        assert_eq!(details.url, "/products/lamp");
        assert_eq!(details.first_photo, "/media/products/lamp.jpg");
        assert_eq!(details.second_photo, crate::db::models::FALLBACK_SECOND_PHOTO);
    }
}
