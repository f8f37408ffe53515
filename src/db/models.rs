use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use diesel::prelude::*;
use std::fmt;
use crate::db::schema::{
    brands, categories, customers, order_products, orders, product_images, products,
    shipping_addresses,
};

/// Shown by [`first_photo`] when a product has no images.
pub const FALLBACK_PHOTO_URL: &str =
    "https://cs8.pikabu.ru/post_img/big/2016/09/10/4/1473482891145853538.jpg";

/// Shown by [`second_photo`] when a product has fewer than two usable images.
pub const FALLBACK_SECOND_PHOTO: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAOEAAADhCAMAAAAJbSJIAAABg1BMVEXDw8MAAADGxsbDw8Svr6/Ly8u3t7fIyMiYmJjGx8iQkJDFxsfKycfKvLA9JAC2v8oAABeYd1cAAA0oAAB3Vz0+ZIeqkX4FLkq/vLnJxbsAACwAAB4hAAAAACNYLwAIAACZe18UAACpjXMAAAgtAAC3pZi5u8C8urOAc2taWVmCkJ+RhXpwfo+usbSFcVlETVFacIpZNwqnucZFIgCLore7sZtTc4MlR21MT0JJYHc0UGNlSTAAIkI4RFE4KxMQIzMlMj1khZ9OS0mrmoCjkW4ANmJKKRB6XThMHQByTiN8dVt1SAtxjqCWgFkAK1XA0tRnRC+1qox4lLLMx6yIZz0aLUVOQSFhOgCJZ0g2AAAAADhWOh0RFhJpd4ehsMN4YUQwGgCHqLQ7GAAAPGlIGQAyKy8AGjYAIFE8CgB+nq1+YFFjZmtuYk1ra2BYZXVcUzmxv655eYOsoZh+f38jDgAxEACftbs+UnAlP1kZS3LFqJCIf3EAHSnKvakAGj8yODUyHRgPp2SkAAAF3ElEQVR4nO3Z+1cTRxwF8L27HTabGQygSFYQEE2ioSgNCSpgEQFfjcZiVURcFSpWo9bGBxGL9k/vdzYBKT1tT38pqed+zkkmO0zC3sw+ZiaOQ0RERERERERERERERERERERERERERERERERERERERERERERERERERH/Lteyz48nD8XzhNquldAJbsbPx9pt2tPI+f0qr8cxXliePbFoebu74iRMn8l46rh7xdHpYtr/ONvY8rs2aRimvnGap4xcjafuOPQ60m2dOAqeOYPQboBCOoVg6gvGvxnC6BHSdAc6G+zAxMomplG0ddOLct5iO3FCaAx0FW54/g5lwEr0XgCTQk93rSLvoWWBGzaF7EPMqvFhWlzCl1RAQXZb6Kzh0Fb2RvyGNjLQOvpuRRii7wbXrzhzmjUT+WFGZp51AUd5a7seo2etIuwSL6IhKfYcLg1g1N8rG7ceE1t8DC5exoK6h5wCmU97NAZxt7LkOwosdBSf4YVyVBq4rSXjrNrrVHcwHs6hXJKFqsYhxQlcpfxDTt7GdcAB56cPc3enoEm5Jwr5mQs8dvijJHXVnwc8MLFUkIe7fW1X9OK21MlIun7uf9f/pv/6XgjmbUMpBTD3AujZXmn1YlISJRFZ1xn3YPEodrdK1h5jxw7uRmznSW/A7MVWpjZhLuK4lf3gZj0orKAd7HWsHLVeUsokTrm6+PfpITsHrXjCEJf0jFozr6A05D90NdNmvQVo/Hk91Yi212VGRhIgk4Wmj1cgQugpytwl/hP2E3kIr3TP8Ray98311Ek/UQZxWcu0sSJfMGJvQXmsnUZbzcT0+8tSdrkguS72F2SdKScKidPG8UkOrck2tV3w//AlP1SDwqJUSeuYZUK1Gi3K3CEp9Zb/0cPo5RgP3J6zbg80L73W8wHp8s3Ckc0+96MPMIJryk8DLn1H2wxvofV19tR9rLyAH+95m2k3lEsm8n0skRhwdJrU2ieSIcdxaIhHfvD1TS+ZVs22QSyYTqXDlfiL2oLtRSiJVs29rbLbSaRjzdoy3mgMweaW3B2B6x1AsHp2lfwniQVrQnve3xna2lft5qPd/t3U78L6EMERERHKj9hvrMm5jcUaedtTE5db2Nre54flK7GjQ3G4tupa08iYjzyOuDNCCZo2/VQ7HZWJ7z2XglrRLFTr3fHl5eSJSjYbJSnj88fLyuXyLRdQHgVuvZT6RgUyA/IMo+qV4TD0qc3gcfv28q4TqG9SvHm6MvaW/wruoB9Jn7W9xNp5IjE3clpYoXkFPJbM1k2wZOnPkaKTClaJZtEstc6vKu7m/GE5iwW/fh3Laqw3PqAPoNsffxc1L1ap8H/XX1WphDojczTdYr8q0qye1IZOKBSPTqNXWS5jXKpf1wjHU1TdF19vsqpgDMo+XhJ8ktZxiNmE8FPXCY1hXV2TzHuon0VHwbq5IRWATypPMC+W7WWqtqYXODBw9deFlZBy7dFGtB1KzpLYS1msoGidO2Gi9AZniSkKZE689k4SOTeg3Eg7FCR9gSf3D//xv6Yzs52afPXlkz2Uq6wRz741kGrcJF8KszIX+mPCRtBuVif7aB7tysfkWoyZO6NrFHduH71vtKEVHpBaxVjGJ8FiPncoujhupeK8kYdENMpH7OaEX9uOsloThPXS398khnBmQkzFO6Lj98j2lx+LFjxYiCY9Gsr9TqcyhVytlmdvn9s20tU1iKmv70GTuFl2znVAifnj88iImzjzOazMofXnN/qmRUM/KiTyL+RZbwpCE+PVb9OaNvfhrx2vf31yCmRqGXal/Enib+3EotfUGX20CH1PKdzzz4c0nvJRARo7vp3I0zz48j4lUi90PHafNysqVJt2m7apiTzauyf0WxaXXaPL59xYvvbXp+em2xuqv/QQpAvmTbrmAu7i15q9MuvZXndFqPy79W+6fXhARERERERERERERERERERERERERERERERERERERERERERERERERERERERER0Rfod9ooyNqLe5ezAAAAAElFTkSuQmCC";

#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = categories)]
pub struct Category {
    pub id: i32,
    pub title: String,
    pub slug: Option<String>,
}

impl Category {
    /// Path of the page listing this category's products.
    pub fn absolute_url(&self) -> String {
        format!("/categories/{}/products", self.slug.as_deref().unwrap_or_default())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[derive(Insertable, Deserialize, Debug)]
#[diesel(table_name = categories)]
pub struct NewCategory {
    pub title: String,
    pub slug: Option<String>,
}

#[derive(AsChangeset, Deserialize, Debug, Default)]
#[diesel(table_name = categories)]
pub struct UpdateCategory {
    pub title: Option<String>,
    pub slug: Option<String>,
}

#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = brands)]
pub struct Brand {
    pub id: i32,
    pub title: String,
    pub slug: Option<String>,
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[derive(Insertable, Deserialize, Debug)]
#[diesel(table_name = brands)]
pub struct NewBrand {
    pub title: String,
    pub slug: Option<String>,
}

#[derive(AsChangeset, Deserialize, Debug, Default)]
#[diesel(table_name = brands)]
pub struct UpdateBrand {
    pub title: Option<String>,
    pub slug: Option<String>,
}

#[derive(Queryable, Identifiable, Selectable, Associations, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Category))]
#[diesel(table_name = products)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub descr: String,
    pub price: i32,
    pub quantity: i32,
    pub is_available: bool,
    pub category_id: i32,
    pub brand_id: Option<i32>,
    pub slug: String,
}

impl Product {
    /// Path of this product's detail page.
    pub fn absolute_url(&self) -> String {
        format!("/products/{}", self.slug)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = products)]
pub struct NewProduct {
    pub title: String,
    pub descr: String,
    pub price: i32,
    pub quantity: i32,
    pub is_available: bool,
    pub category_id: i32,
    pub brand_id: Option<i32>,
    pub slug: String,
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = products)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub descr: Option<String>,
    pub price: Option<i32>,
    pub quantity: Option<i32>,
    pub is_available: Option<bool>,
    pub category_id: Option<i32>,
    pub brand_id: Option<Option<i32>>,
    pub slug: Option<String>,
}

impl UpdateProduct {
    /// True when no column would be touched by this changeset.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.descr.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.is_available.is_none()
            && self.category_id.is_none()
            && self.brand_id.is_none()
            && self.slug.is_none()
    }
}

#[derive(Queryable, Identifiable, Selectable, Associations, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Product))]
#[diesel(table_name = product_images)]
pub struct ProductImage {
    pub id: i32,
    /// Storage path relative to the media root, e.g. `products/abc.jpg`.
    pub photo: Option<String>,
    pub product_id: i32,
}

impl ProductImage {
    /// Public URL of the stored photo, if the image has one.
    pub fn url(&self, media_url: &str) -> Option<String> {
        let path = self.photo.as_deref().filter(|p| !p.is_empty())?;
        Some(format!("{}/{}", media_url.trim_end_matches('/'), path.trim_start_matches('/')))
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = product_images)]
pub struct NewProductImage {
    pub photo: Option<String>,
    pub product_id: i32,
}

/// URL of the first image, or [`FALLBACK_PHOTO_URL`] when there is none.
///
/// `images` is expected in id order, as returned by the repository.
pub fn first_photo(images: &[ProductImage], media_url: &str) -> String {
    images
        .first()
        .and_then(|img| img.url(media_url))
        .unwrap_or_else(|| FALLBACK_PHOTO_URL.to_string())
}

/// URL of the second image, or [`FALLBACK_SECOND_PHOTO`] when it is missing or unusable.
pub fn second_photo(images: &[ProductImage], media_url: &str) -> String {
    images
        .get(1)
        .and_then(|img| img.url(media_url))
        .unwrap_or_else(|| FALLBACK_SECOND_PHOTO.to_string())
}

#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = orders)]
pub struct Order {
    pub id: i32,
    pub user_id: Option<i32>,
    pub order_date: NaiveDateTime,
    pub transaction_id: String,
    pub shipping: bool,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub user_id: Option<i32>,
    pub transaction_id: String,
    pub shipping: bool,
}

#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = order_products)]
pub struct OrderProduct {
    pub id: i32,
    pub order_id: Option<i32>,
    pub product_id: Option<i32>,
    pub quantity: i32,
    pub added_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = order_products)]
pub struct NewOrderProduct {
    pub order_id: Option<i32>,
    pub product_id: Option<i32>,
    pub quantity: i32,
}

/// A line item loaded together with the product it refers to.
///
/// `product` is `None` once the product has been deleted.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OrderLine {
    #[serde(flatten)]
    pub item: OrderProduct,
    pub product: Option<Product>,
}

impl OrderLine {
    /// Unit price times quantity. A line without a product is worth nothing.
    pub fn total_price(&self) -> i64 {
        self.product
            .as_ref()
            .map_or(0, |p| i64::from(p.price) * i64::from(self.item.quantity))
    }
}

pub fn cart_total_quantity(lines: &[OrderLine]) -> i64 {
    lines.iter().map(|l| i64::from(l.item.quantity)).sum()
}

pub fn cart_total_price(lines: &[OrderLine]) -> i64 {
    lines.iter().map(OrderLine::total_price).sum()
}

#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = customers)]
pub struct Customer {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub company_name: String,
}

#[derive(Insertable, Deserialize, Debug)]
#[diesel(table_name = customers)]
pub struct NewCustomer {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub company_name: String,
}

#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = shipping_addresses)]
pub struct ShippingAddress {
    pub id: i32,
    pub country: String,
    pub address: String,
    pub town: String,
    pub zip_code: String,
    pub phone: String,
    pub comment: Option<String>,
    pub customer_id: Option<i32>,
    pub order_id: Option<i32>,
}

#[derive(Insertable, Deserialize, Debug)]
#[diesel(table_name = shipping_addresses)]
pub struct NewShippingAddress {
    pub country: String,
    pub address: String,
    pub town: String,
    pub zip_code: String,
    pub phone: String,
    pub comment: Option<String>,
    pub customer_id: Option<i32>,
    pub order_id: Option<i32>,
}
