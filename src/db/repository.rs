use diesel::prelude::*;
use crate::db::models::*;
use crate::db::schema::*;
use crate::models::ProductQuery;
use crate::slug::{ensure_slug, is_blank, slugify};

// ---- categories ----

pub fn create_category(conn: &mut PgConnection, mut new_category: NewCategory) -> QueryResult<Category> {
    new_category.slug = Some(ensure_slug(new_category.slug.take(), &new_category.title));
    let category: Category = diesel::insert_into(categories::table)
        .values(&new_category)
        .get_result(conn)?;
    tracing::info!(id = category.id, slug = ?category.slug, "created category");
    Ok(category)
}

pub fn get_category(conn: &mut PgConnection, id: i32) -> QueryResult<Category> {
    categories::table.find(id).first(conn)
}

pub fn get_category_by_slug(conn: &mut PgConnection, slug: &str) -> QueryResult<Category> {
    categories::table.filter(categories::slug.eq(slug)).first(conn)
}

pub fn get_all_categories(conn: &mut PgConnection) -> QueryResult<Vec<Category>> {
    categories::table.order(categories::title.asc()).load(conn)
}

/// Applies `changes`; a blank slug is re-derived from the (possibly new) title.
pub fn update_category(conn: &mut PgConnection, id: i32, mut changes: UpdateCategory) -> QueryResult<Category> {
    if changes.slug.is_some() && is_blank(changes.slug.as_deref()) {
        let title = match &changes.title {
            Some(title) => title.clone(),
            None => get_category(conn, id)?.title,
        };
        changes.slug = Some(slugify(&title));
    }
    diesel::update(categories::table.find(id))
        .set(&changes)
        .get_result(conn)
}

/// Deletes the category and, through the foreign key, its products.
pub fn delete_category(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
    let deleted = diesel::delete(categories::table.find(id)).execute(conn)?;
    tracing::info!(id, deleted, "deleted category");
    Ok(deleted)
}

pub fn get_products_by_category(conn: &mut PgConnection, category_id: i32) -> QueryResult<Vec<Product>> {
    products::table
        .filter(products::category_id.eq(category_id))
        .order(products::title.asc())
        .load(conn)
}

// ---- brands ----

pub fn create_brand(conn: &mut PgConnection, mut new_brand: NewBrand) -> QueryResult<Brand> {
    new_brand.slug = Some(ensure_slug(new_brand.slug.take(), &new_brand.title));
    let brand: Brand = diesel::insert_into(brands::table)
        .values(&new_brand)
        .get_result(conn)?;
    tracing::info!(id = brand.id, slug = ?brand.slug, "created brand");
    Ok(brand)
}

pub fn get_brand(conn: &mut PgConnection, id: i32) -> QueryResult<Brand> {
    brands::table.find(id).first(conn)
}

pub fn get_all_brands(conn: &mut PgConnection) -> QueryResult<Vec<Brand>> {
    brands::table.order(brands::title.asc()).load(conn)
}

pub fn update_brand(conn: &mut PgConnection, id: i32, mut changes: UpdateBrand) -> QueryResult<Brand> {
    if changes.slug.is_some() && is_blank(changes.slug.as_deref()) {
        let title = match &changes.title {
            Some(title) => title.clone(),
            None => get_brand(conn, id)?.title,
        };
        changes.slug = Some(slugify(&title));
    }
    diesel::update(brands::table.find(id))
        .set(&changes)
        .get_result(conn)
}

/// Deletes the brand; its products stay, with `brand_id` cleared.
pub fn delete_brand(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
    let deleted = diesel::delete(brands::table.find(id)).execute(conn)?;
    tracing::info!(id, deleted, "deleted brand");
    Ok(deleted)
}

// ---- products ----

pub fn create_product(conn: &mut PgConnection, mut new_product: NewProduct) -> QueryResult<Product> {
    if is_blank(Some(&new_product.slug)) {
        new_product.slug = slugify(&new_product.title);
    }
    let product: Product = diesel::insert_into(products::table)
        .values(&new_product)
        .get_result(conn)?;
    tracing::info!(id = product.id, slug = %product.slug, "created product");
    Ok(product)
}

pub fn get_product(conn: &mut PgConnection, id: i32) -> QueryResult<Product> {
    products::table.find(id).first(conn)
}

pub fn get_product_by_slug(conn: &mut PgConnection, slug: &str) -> QueryResult<Product> {
    products::table.filter(products::slug.eq(slug)).first(conn)
}

pub fn update_product(conn: &mut PgConnection, id: i32, mut changes: UpdateProduct) -> QueryResult<Product> {
    if changes.slug.is_some() && is_blank(changes.slug.as_deref()) {
        let title = match &changes.title {
            Some(title) => title.clone(),
            None => get_product(conn, id)?.title,
        };
        changes.slug = Some(slugify(&title));
    }
    if changes.is_empty() {
        return get_product(conn, id);
    }
    diesel::update(products::table.find(id))
        .set(&changes)
        .get_result(conn)
}

/// Deletes the product with its images; order lines keep a null `product_id`.
pub fn delete_product(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
    let deleted = diesel::delete(products::table.find(id)).execute(conn)?;
    tracing::info!(id, deleted, "deleted product");
    Ok(deleted)
}

pub fn get_all_products(conn: &mut PgConnection, query: &ProductQuery) -> QueryResult<Vec<Product>> {
    let mut q = products::table.into_boxed();

    if let Some(cat_id) = query.category_id {
        q = q.filter(products::category_id.eq(cat_id));
    }

    if let Some(brand_id) = query.brand_id {
        q = q.filter(products::brand_id.eq(brand_id));
    }

    if let Some(available) = query.available {
        q = q.filter(products::is_available.eq(available));
    }

    if let Some(min) = query.min_price {
        q = q.filter(products::price.ge(min));
    }

    if let Some(max) = query.max_price {
        q = q.filter(products::price.le(max));
    }

    if let Some(term) = query.search_term.as_deref().filter(|t| !t.trim().is_empty()) {
        let pattern = like_pattern(term);
        q = q.filter(
            products::title.ilike(pattern.clone())
                .or(products::descr.ilike(pattern))
        );
    }

    let order = query.sort_order.as_deref().unwrap_or("asc");
    q = match (query.sort_by.as_deref(), order) {
        (Some("title"), "desc") => q.order(products::title.desc()),
        (Some("title"), _) => q.order(products::title.asc()),
        (Some("price"), "desc") => q.order(products::price.desc()),
        (Some("price"), _) => q.order(products::price.asc()),
        (_, "desc") => q.order(products::id.desc()),
        _ => q.order(products::id.asc()),
    };

    q.load(conn)
}

/// Substring pattern for `ILIKE`; `%`, `_` and `\` in `term` match literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.trim().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---- product images ----

pub fn add_product_image(conn: &mut PgConnection, new_image: NewProductImage) -> QueryResult<ProductImage> {
    let image: ProductImage = diesel::insert_into(product_images::table)
        .values(&new_image)
        .get_result(conn)?;
    tracing::info!(id = image.id, product_id = image.product_id, "added product image");
    Ok(image)
}

pub fn get_product_image(conn: &mut PgConnection, id: i32) -> QueryResult<ProductImage> {
    product_images::table.find(id).first(conn)
}

/// Images of one product, oldest first.
pub fn get_product_images(conn: &mut PgConnection, product: &Product) -> QueryResult<Vec<ProductImage>> {
    ProductImage::belonging_to(product)
        .order(product_images::id.asc())
        .load(conn)
}

/// Images for many products in one query, grouped in the order of `products`.
pub fn get_images_for_products(conn: &mut PgConnection, products: &[Product]) -> QueryResult<Vec<Vec<ProductImage>>> {
    let images = ProductImage::belonging_to(products)
        .order(product_images::id.asc())
        .load::<ProductImage>(conn)?;
    Ok(images.grouped_by(products))
}

pub fn delete_product_image(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
    diesel::delete(product_images::table.find(id)).execute(conn)
}

// ---- customers ----

pub fn create_customer(conn: &mut PgConnection, new_customer: NewCustomer) -> QueryResult<Customer> {
    diesel::insert_into(customers::table)
        .values(&new_customer)
        .get_result(conn)
}

pub fn get_customer(conn: &mut PgConnection, id: i32) -> QueryResult<Customer> {
    customers::table.find(id).first(conn)
}

pub fn get_all_customers(conn: &mut PgConnection) -> QueryResult<Vec<Customer>> {
    customers::table
        .order((customers::lastname.asc(), customers::firstname.asc()))
        .load(conn)
}

pub fn delete_customer(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
    diesel::delete(customers::table.find(id)).execute(conn)
}

// ---- shipping addresses ----

pub fn create_shipping_address(conn: &mut PgConnection, new_address: NewShippingAddress) -> QueryResult<ShippingAddress> {
    diesel::insert_into(shipping_addresses::table)
        .values(&new_address)
        .get_result(conn)
}

pub fn get_shipping_address(conn: &mut PgConnection, id: i32) -> QueryResult<ShippingAddress> {
    shipping_addresses::table.find(id).first(conn)
}

pub fn get_shipping_addresses_for_order(conn: &mut PgConnection, order_id: i32) -> QueryResult<Vec<ShippingAddress>> {
    shipping_addresses::table
        .filter(shipping_addresses::order_id.eq(order_id))
        .order(shipping_addresses::id.asc())
        .load(conn)
}

pub fn delete_shipping_address(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
    diesel::delete(shipping_addresses::table.find(id)).execute(conn)
}

// ---- orders ----

pub fn create_order(conn: &mut PgConnection, new_order: NewOrder) -> QueryResult<Order> {
    let order: Order = diesel::insert_into(orders::table)
        .values(&new_order)
        .get_result(conn)?;
    tracing::info!(id = order.id, user_id = ?order.user_id, "created order");
    Ok(order)
}

pub fn get_order(conn: &mut PgConnection, id: i32) -> QueryResult<Order> {
    orders::table.find(id).first(conn)
}

pub fn get_all_orders(conn: &mut PgConnection, user_id: Option<i32>) -> QueryResult<Vec<Order>> {
    let mut q = orders::table.into_boxed();
    if let Some(user_id) = user_id {
        q = q.filter(orders::user_id.eq(user_id));
    }
    q.order(orders::order_date.desc()).load(conn)
}

/// Deletes the order; its line items and shipping addresses keep a null `order_id`.
pub fn delete_order(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
    let deleted = diesel::delete(orders::table.find(id)).execute(conn)?;
    tracing::info!(id, deleted, "deleted order");
    Ok(deleted)
}

/// Line items of an order with their products, in insertion order.
pub fn get_order_lines(conn: &mut PgConnection, order_id: i32) -> QueryResult<Vec<OrderLine>> {
    let rows = order_products::table
        .left_join(products::table)
        .filter(order_products::order_id.eq(order_id))
        .order(order_products::id.asc())
        .select((order_products::all_columns, products::all_columns.nullable()))
        .load::<(OrderProduct, Option<Product>)>(conn)?;
    Ok(rows
        .into_iter()
        .map(|(item, product)| OrderLine { item, product })
        .collect())
}

pub fn add_order_product(conn: &mut PgConnection, new_item: NewOrderProduct) -> QueryResult<OrderProduct> {
    let item: OrderProduct = diesel::insert_into(order_products::table)
        .values(&new_item)
        .get_result(conn)?;
    tracing::info!(
        id = item.id,
        order_id = ?item.order_id,
        product_id = ?item.product_id,
        quantity = item.quantity,
        "added product to order"
    );
    Ok(item)
}

pub fn get_order_product(conn: &mut PgConnection, id: i32) -> QueryResult<OrderProduct> {
    order_products::table.find(id).first(conn)
}

pub fn update_order_product_quantity(conn: &mut PgConnection, id: i32, quantity: i32) -> QueryResult<OrderProduct> {
    diesel::update(order_products::table.find(id))
        .set(order_products::quantity.eq(quantity))
        .get_result(conn)
}

pub fn delete_order_product(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
    diesel::delete(order_products::table.find(id)).execute(conn)
}
