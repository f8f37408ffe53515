use actix_multipart::Multipart;
use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use diesel::{pg::PgConnection, Connection};
use futures::future::{ready, Ready};
use futures::StreamExt;
use serde_json::json;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use crate::config::MediaSettings;
use crate::db::connection::PgPool;
use crate::db::models::*;
use crate::db::repository;
use crate::error::AppError;
use crate::models::*;

pub struct AppState {
    pub pool: PgPool,
    pub media: MediaSettings,
}

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Runs blocking Diesel work on the thread pool with a pooled connection.
async fn run<T, F>(pool: &PgPool, f: F) -> Result<T, AppError>
where
    F: FnOnce(&mut PgConnection) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    web::block(move || {
        let mut conn = pool.get()?;
        f(&mut *conn)
    })
    .await?
}

fn deleted_or_not_found(deleted: usize, entity: &'static str) -> Result<HttpResponse, AppError> {
    if deleted == 0 {
        return Err(AppError::NotFound(entity));
    }
    Ok(HttpResponse::NoContent().finish())
}

/// The account an order belongs to, taken from `Authorization: Bearer <user_id>`.
///
/// A missing header means an anonymous cart; a malformed one is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaybeUser(pub Option<i32>);

impl FromRequest for MaybeUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(auth_header) = req.headers().get("Authorization") else {
            return ready(Ok(MaybeUser(None)));
        };
        let user_id = auth_header
            .to_str()
            .ok()
            .and_then(|s| s.strip_prefix("Bearer "))
            .and_then(|token| token.trim().parse::<i32>().ok());
        match user_id {
            Some(id) => ready(Ok(MaybeUser(Some(id)))),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "Invalid Authorization header",
            ))),
        }
    }
}

// ---- categories ----

async fn get_categories(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = run(&data.pool, |conn| Ok(repository::get_all_categories(conn)?)).await?;
    Ok(HttpResponse::Ok().json(categories))
}

async fn get_category(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let category = run(&data.pool, move |conn| {
        repository::get_category(conn, id).map_err(|e| AppError::or_not_found(e, "Category"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(category))
}

async fn create_category(data: web::Data<AppState>, req: web::Json<TitleRequest>) -> Result<HttpResponse, AppError> {
    validate_title(&req)?;
    let req = req.into_inner();
    let new_category = NewCategory { title: req.title.trim().to_string(), slug: req.slug };
    let category = run(&data.pool, move |conn| Ok(repository::create_category(conn, new_category)?)).await?;
    Ok(HttpResponse::Created().json(category))
}

async fn update_category(
    data: web::Data<AppState>,
    id: web::Path<i32>,
    req: web::Json<TitleRequest>,
) -> Result<HttpResponse, AppError> {
    validate_title(&req)?;
    let id = id.into_inner();
    let req = req.into_inner();
    let changes = UpdateCategory { title: Some(req.title.trim().to_string()), slug: req.slug };
    let category = run(&data.pool, move |conn| {
        repository::update_category(conn, id, changes).map_err(|e| AppError::or_not_found(e, "Category"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(category))
}

async fn delete_category(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let deleted = run(&data.pool, move |conn| Ok(repository::delete_category(conn, id)?)).await?;
    deleted_or_not_found(deleted, "Category")
}

fn product_details(conn: &mut PgConnection, products: Vec<Product>, media_url: &str) -> Result<Vec<ProductDetails>, AppError> {
    let images = repository::get_images_for_products(conn, &products)?;
    Ok(products
        .into_iter()
        .zip(images)
        .map(|(product, images)| ProductDetails::new(product, &images, media_url))
        .collect())
}

async fn get_category_products(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let media_url = data.media.url.clone();
    let products = run(&data.pool, move |conn| {
        repository::get_category(conn, id).map_err(|e| AppError::or_not_found(e, "Category"))?;
        let products = repository::get_products_by_category(conn, id)?;
        product_details(conn, products, &media_url)
    })
    .await?;
    Ok(HttpResponse::Ok().json(products))
}

/// Target of `Category::absolute_url`.
async fn category_page(data: web::Data<AppState>, slug: web::Path<String>) -> Result<HttpResponse, AppError> {
    let slug = slug.into_inner();
    let media_url = data.media.url.clone();
    let (category, products) = run(&data.pool, move |conn| {
        let category = repository::get_category_by_slug(conn, &slug)
            .map_err(|e| AppError::or_not_found(e, "Category"))?;
        let products = repository::get_products_by_category(conn, category.id)?;
        Ok((category, product_details(conn, products, &media_url)?))
    })
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "category": category, "products": products })))
}

// ---- brands ----

async fn get_brands(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let brands = run(&data.pool, |conn| Ok(repository::get_all_brands(conn)?)).await?;
    Ok(HttpResponse::Ok().json(brands))
}

async fn get_brand(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let brand = run(&data.pool, move |conn| {
        repository::get_brand(conn, id).map_err(|e| AppError::or_not_found(e, "Brand"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(brand))
}

async fn create_brand(data: web::Data<AppState>, req: web::Json<TitleRequest>) -> Result<HttpResponse, AppError> {
    validate_title(&req)?;
    let req = req.into_inner();
    let new_brand = NewBrand { title: req.title.trim().to_string(), slug: req.slug };
    let brand = run(&data.pool, move |conn| Ok(repository::create_brand(conn, new_brand)?)).await?;
    Ok(HttpResponse::Created().json(brand))
}

async fn update_brand(
    data: web::Data<AppState>,
    id: web::Path<i32>,
    req: web::Json<TitleRequest>,
) -> Result<HttpResponse, AppError> {
    validate_title(&req)?;
    let id = id.into_inner();
    let req = req.into_inner();
    let changes = UpdateBrand { title: Some(req.title.trim().to_string()), slug: req.slug };
    let brand = run(&data.pool, move |conn| {
        repository::update_brand(conn, id, changes).map_err(|e| AppError::or_not_found(e, "Brand"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(brand))
}

async fn delete_brand(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let deleted = run(&data.pool, move |conn| Ok(repository::delete_brand(conn, id)?)).await?;
    deleted_or_not_found(deleted, "Brand")
}

// ---- products ----

async fn get_products(data: web::Data<AppState>, query: web::Query<ProductQuery>) -> Result<HttpResponse, AppError> {
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            return Err(AppError::validation("min_price cannot exceed max_price"));
        }
    }
    let query = query.into_inner();
    let media_url = data.media.url.clone();
    let products = run(&data.pool, move |conn| {
        let products = repository::get_all_products(conn, &query)?;
        product_details(conn, products, &media_url)
    })
    .await?;
    Ok(HttpResponse::Ok().json(products))
}

async fn get_product(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let media_url = data.media.url.clone();
    let details = run(&data.pool, move |conn| {
        let product = repository::get_product(conn, id).map_err(|e| AppError::or_not_found(e, "Product"))?;
        let images = repository::get_product_images(conn, &product)?;
        Ok(ProductDetails::new(product, &images, &media_url))
    })
    .await?;
    Ok(HttpResponse::Ok().json(details))
}

/// Target of `Product::absolute_url`.
async fn product_page(data: web::Data<AppState>, slug: web::Path<String>) -> Result<HttpResponse, AppError> {
    let slug = slug.into_inner();
    let media_url = data.media.url.clone();
    let details = run(&data.pool, move |conn| {
        let product = repository::get_product_by_slug(conn, &slug)
            .map_err(|e| AppError::or_not_found(e, "Product"))?;
        let images = repository::get_product_images(conn, &product)?;
        Ok(ProductDetails::new(product, &images, &media_url))
    })
    .await?;
    Ok(HttpResponse::Ok().json(details))
}

async fn create_product(
    data: web::Data<AppState>,
    req: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    validate_product(&req)?;
    let req = req.into_inner();
    let new_product = NewProduct {
        title: req.title.trim().to_string(),
        descr: req.descr,
        price: req.price,
        quantity: req.quantity,
        is_available: req.is_available,
        category_id: req.category_id,
        brand_id: req.brand_id,
        slug: req.slug.unwrap_or_default(),
    };
    let media_url = data.media.url.clone();
    let details = run(&data.pool, move |conn| {
        let product = repository::create_product(conn, new_product)?;
        Ok(ProductDetails::new(product, &[], &media_url))
    })
    .await?;
    Ok(HttpResponse::Created().json(details))
}

async fn update_product(
    data: web::Data<AppState>,
    id: web::Path<i32>,
    req: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    validate_product_update(&req)?;
    let id = id.into_inner();
    let changes = UpdateProduct::from(req.into_inner());
    let product = run(&data.pool, move |conn| {
        repository::update_product(conn, id, changes).map_err(|e| AppError::or_not_found(e, "Product"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(product))
}

async fn delete_product(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let deleted = run(&data.pool, move |conn| Ok(repository::delete_product(conn, id)?)).await?;
    deleted_or_not_found(deleted, "Product")
}

// ---- product images ----

async fn get_product_images(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let media_url = data.media.url.clone();
    let images = run(&data.pool, move |conn| {
        let product = repository::get_product(conn, id).map_err(|e| AppError::or_not_found(e, "Product"))?;
        let images = repository::get_product_images(conn, &product)?;
        Ok(images
            .iter()
            .map(|img| ImageView { id: img.id, url: img.url(&media_url) })
            .collect::<Vec<_>>())
    })
    .await?;
    Ok(HttpResponse::Ok().json(images))
}

fn image_extension(filename: Option<&str>) -> Option<String> {
    let ext = Path::new(filename?).extension()?.to_str()?.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Writes each `(relative path, bytes)` under `root`. On failure the files
/// already written are removed again.
fn store_files(root: &Path, files: &[(String, Vec<u8>)]) -> std::io::Result<()> {
    for (written, (relative, bytes)) in files.iter().enumerate() {
        let full_path = root.join(relative);
        let result = match full_path.parent() {
            Some(dir) => std::fs::create_dir_all(dir),
            None => Ok(()),
        }
        .and_then(|()| std::fs::write(&full_path, bytes));
        if let Err(err) = result {
            remove_files(root, files[..written].iter().map(|(relative, _)| relative.as_str()));
            return Err(err);
        }
    }
    Ok(())
}

fn remove_files<'a>(root: &Path, relatives: impl IntoIterator<Item = &'a str>) {
    for relative in relatives {
        if let Err(err) = std::fs::remove_file(root.join(relative)) {
            tracing::warn!(photo = relative, error = %err, "could not remove image file");
        }
    }
}

/// Stores every image part of a multipart upload under `products/` and records it.
///
/// The whole request is read before anything touches the disk or the database.
/// Rows are inserted in one transaction; if that fails the stored files are
/// removed, so a rejected upload leaves nothing behind.
async fn upload_product_images(
    data: web::Data<AppState>,
    id: web::Path<i32>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let product_id = id.into_inner();
    let max_bytes = data.media.max_upload_bytes;
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    while let Some(item) = payload.next().await {
        let mut field = item?;
        let Some(ext) = image_extension(field.content_disposition().get_filename()) else {
            continue;
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::validation(format!("image exceeds {max_bytes} bytes")));
            }
            bytes.extend_from_slice(&chunk);
        }
        files.push((format!("products/{}.{}", Uuid::new_v4(), ext), bytes));
    }

    if files.is_empty() {
        return Err(AppError::validation(format!(
            "upload must contain an image file ({})",
            IMAGE_EXTENSIONS.join(", ")
        )));
    }

    run(&data.pool, move |conn| {
        repository::get_product(conn, product_id).map_err(|e| AppError::or_not_found(e, "Product"))
    })
    .await?;

    let root = PathBuf::from(&data.media.root);
    let photos: Vec<String> = files.iter().map(|(relative, _)| relative.clone()).collect();
    let store_root = root.clone();
    web::block(move || store_files(&store_root, &files)).await??;

    let media_url = data.media.url.clone();
    let to_insert = photos.clone();
    let inserted = run(&data.pool, move |conn| {
        conn.transaction(|conn| {
            to_insert
                .into_iter()
                .map(|photo| -> Result<ImageView, AppError> {
                    let image = repository::add_product_image(conn, NewProductImage { photo: Some(photo), product_id })?;
                    Ok(ImageView { id: image.id, url: image.url(&media_url) })
                })
                .collect::<Result<Vec<_>, AppError>>()
        })
    })
    .await;

    match inserted {
        Ok(images) => Ok(HttpResponse::Created().json(images)),
        Err(err) => {
            tracing::warn!(product_id, error = %err, "image rows not saved, removing files");
            if web::block(move || remove_files(&root, photos.iter().map(String::as_str))).await.is_err() {
                tracing::warn!(product_id, "could not schedule image file cleanup");
            }
            Err(err)
        }
    }
}

async fn delete_product_image(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let image = run(&data.pool, move |conn| {
        let image = repository::get_product_image(conn, id).map_err(|e| AppError::or_not_found(e, "Image"))?;
        repository::delete_product_image(conn, id)?;
        Ok(image)
    })
    .await?;

    if let Some(photo) = image.photo.filter(|p| !p.is_empty()) {
        let full_path = PathBuf::from(&data.media.root).join(&photo);
        if let Err(err) = web::block(move || std::fs::remove_file(full_path)).await? {
            tracing::warn!(image_id = id, %photo, error = %err, "could not remove image file");
        }
    }
    Ok(HttpResponse::NoContent().finish())
}

// ---- customers ----

async fn get_customers(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let customers = run(&data.pool, |conn| Ok(repository::get_all_customers(conn)?)).await?;
    let views: Vec<CustomerView> = customers.into_iter().map(CustomerView::from).collect();
    Ok(HttpResponse::Ok().json(views))
}

async fn get_customer(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let customer = run(&data.pool, move |conn| {
        repository::get_customer(conn, id).map_err(|e| AppError::or_not_found(e, "Customer"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(CustomerView::from(customer)))
}

async fn create_customer(data: web::Data<AppState>, req: web::Json<NewCustomer>) -> Result<HttpResponse, AppError> {
    validate_customer(&req)?;
    let new_customer = req.into_inner();
    let customer = run(&data.pool, move |conn| Ok(repository::create_customer(conn, new_customer)?)).await?;
    Ok(HttpResponse::Created().json(CustomerView::from(customer)))
}

async fn delete_customer(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let deleted = run(&data.pool, move |conn| Ok(repository::delete_customer(conn, id)?)).await?;
    deleted_or_not_found(deleted, "Customer")
}

// ---- orders ----

async fn get_orders(data: web::Data<AppState>, user: MaybeUser) -> Result<HttpResponse, AppError> {
    let orders = run(&data.pool, move |conn| Ok(repository::get_all_orders(conn, user.0)?)).await?;
    Ok(HttpResponse::Ok().json(orders))
}

async fn create_order(
    data: web::Data<AppState>,
    user: MaybeUser,
    req: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    validate_order(&req)?;
    let req = req.into_inner();
    let new_order = NewOrder {
        user_id: user.0,
        transaction_id: req.transaction_id.trim().to_string(),
        shipping: req.shipping,
    };
    let order = run(&data.pool, move |conn| Ok(repository::create_order(conn, new_order)?)).await?;
    Ok(HttpResponse::Created().json(OrderSummary::new(order, Vec::new())))
}

async fn get_order(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let summary = run(&data.pool, move |conn| {
        let order = repository::get_order(conn, id).map_err(|e| AppError::or_not_found(e, "Order"))?;
        let lines = repository::get_order_lines(conn, id)?;
        Ok(OrderSummary::new(order, lines))
    })
    .await?;
    Ok(HttpResponse::Ok().json(summary))
}

async fn delete_order(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let deleted = run(&data.pool, move |conn| Ok(repository::delete_order(conn, id)?)).await?;
    deleted_or_not_found(deleted, "Order")
}

async fn add_order_product(
    data: web::Data<AppState>,
    id: web::Path<i32>,
    req: web::Json<AddOrderProductRequest>,
) -> Result<HttpResponse, AppError> {
    if req.quantity < 0 {
        return Err(AppError::validation("quantity cannot be negative"));
    }
    let order_id = id.into_inner();
    let req = req.into_inner();
    let item = run(&data.pool, move |conn| {
        repository::get_order(conn, order_id).map_err(|e| AppError::or_not_found(e, "Order"))?;
        repository::get_product(conn, req.product_id).map_err(|e| AppError::or_not_found(e, "Product"))?;
        let new_item = NewOrderProduct {
            order_id: Some(order_id),
            product_id: Some(req.product_id),
            quantity: req.quantity,
        };
        Ok(repository::add_order_product(conn, new_item)?)
    })
    .await?;
    Ok(HttpResponse::Created().json(item))
}

async fn update_order_product(
    data: web::Data<AppState>,
    id: web::Path<i32>,
    req: web::Json<UpdateQuantityRequest>,
) -> Result<HttpResponse, AppError> {
    if req.quantity < 0 {
        return Err(AppError::validation("quantity cannot be negative"));
    }
    let id = id.into_inner();
    let quantity = req.quantity;
    let item = run(&data.pool, move |conn| {
        repository::update_order_product_quantity(conn, id, quantity)
            .map_err(|e| AppError::or_not_found(e, "Order item"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(item))
}

async fn delete_order_product(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let deleted = run(&data.pool, move |conn| Ok(repository::delete_order_product(conn, id)?)).await?;
    deleted_or_not_found(deleted, "Order item")
}

// ---- shipping addresses ----

async fn get_order_shipping(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let order_id = id.into_inner();
    let addresses = run(&data.pool, move |conn| {
        repository::get_order(conn, order_id).map_err(|e| AppError::or_not_found(e, "Order"))?;
        Ok(repository::get_shipping_addresses_for_order(conn, order_id)?)
    })
    .await?;
    Ok(HttpResponse::Ok().json(addresses))
}

async fn create_order_shipping(
    data: web::Data<AppState>,
    id: web::Path<i32>,
    req: web::Json<NewShippingAddress>,
) -> Result<HttpResponse, AppError> {
    validate_shipping_address(&req)?;
    let order_id = id.into_inner();
    let mut new_address = req.into_inner();
    new_address.order_id = Some(order_id);
    let address = run(&data.pool, move |conn| {
        repository::get_order(conn, order_id).map_err(|e| AppError::or_not_found(e, "Order"))?;
        Ok(repository::create_shipping_address(conn, new_address)?)
    })
    .await?;
    Ok(HttpResponse::Created().json(address))
}

async fn create_shipping(
    data: web::Data<AppState>,
    req: web::Json<NewShippingAddress>,
) -> Result<HttpResponse, AppError> {
    validate_shipping_address(&req)?;
    let new_address = req.into_inner();
    let address = run(&data.pool, move |conn| Ok(repository::create_shipping_address(conn, new_address)?)).await?;
    Ok(HttpResponse::Created().json(address))
}

async fn get_shipping(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let address = run(&data.pool, move |conn| {
        repository::get_shipping_address(conn, id).map_err(|e| AppError::or_not_found(e, "Shipping address"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(address))
}

async fn delete_shipping(data: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let deleted = run(&data.pool, move |conn| Ok(repository::delete_shipping_address(conn, id)?)).await?;
    deleted_or_not_found(deleted, "Shipping address")
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/categories", web::get().to(get_categories))
            .route("/categories", web::post().to(create_category))
            .route("/categories/{id}", web::get().to(get_category))
            .route("/categories/{id}", web::put().to(update_category))
            .route("/categories/{id}", web::delete().to(delete_category))
            .route("/categories/{id}/products", web::get().to(get_category_products))
            .route("/brands", web::get().to(get_brands))
            .route("/brands", web::post().to(create_brand))
            .route("/brands/{id}", web::get().to(get_brand))
            .route("/brands/{id}", web::put().to(update_brand))
            .route("/brands/{id}", web::delete().to(delete_brand))
            .route("/products", web::get().to(get_products))
            .route("/products", web::post().to(create_product))
            .route("/products/{id}", web::get().to(get_product))
            .route("/products/{id}", web::patch().to(update_product))
            .route("/products/{id}", web::delete().to(delete_product))
            .route("/products/{id}/images", web::get().to(get_product_images))
            .route("/products/{id}/images", web::post().to(upload_product_images))
            .route("/images/{id}", web::delete().to(delete_product_image))
            .route("/customers", web::get().to(get_customers))
            .route("/customers", web::post().to(create_customer))
            .route("/customers/{id}", web::get().to(get_customer))
            .route("/customers/{id}", web::delete().to(delete_customer))
            .route("/orders", web::get().to(get_orders))
            .route("/orders", web::post().to(create_order))
            .route("/orders/{id}", web::get().to(get_order))
            .route("/orders/{id}", web::delete().to(delete_order))
            .route("/orders/{id}/items", web::post().to(add_order_product))
            .route("/orders/{id}/shipping", web::get().to(get_order_shipping))
            .route("/orders/{id}/shipping", web::post().to(create_order_shipping))
            .route("/order-items/{id}", web::patch().to(update_order_product))
            .route("/order-items/{id}", web::delete().to(delete_order_product))
            .route("/shipping", web::post().to(create_shipping))
            .route("/shipping/{id}", web::get().to(get_shipping))
            .route("/shipping/{id}", web::delete().to(delete_shipping)),
    )
    .route("/categories/{slug}/products", web::get().to(category_page))
    .route("/products/{slug}", web::get().to(product_page));
}
