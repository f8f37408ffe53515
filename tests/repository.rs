//! Repository behaviour against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`. Every test
//! runs inside a transaction that is rolled back.

use diesel::prelude::*;
use diesel::result::Error;
use diesel_migrations::MigrationHarness;
use std::sync::Once;

use shop_backend::db::models::*;
use shop_backend::db::repository::*;
use shop_backend::db::MIGRATIONS;
use shop_backend::models::ProductQuery;

static MIGRATED: Once = Once::new();

/// A fresh connection; the schema is migrated once per test run.
fn connection() -> PgConnection {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for repository tests");
    MIGRATED.call_once(|| {
        let mut conn = PgConnection::establish(&url).expect("failed to connect");
        conn.run_pending_migrations(MIGRATIONS).expect("failed to migrate");
    });
    PgConnection::establish(&url).expect("failed to connect")
}

fn category(conn: &mut PgConnection, title: &str) -> Category {
    create_category(conn, NewCategory { title: title.to_string(), slug: None }).unwrap()
}

fn product(conn: &mut PgConnection, category_id: i32, title: &str, price: i32) -> Product {
    create_product(
        conn,
        NewProduct {
            title: title.to_string(),
            descr: format!("{title} description"),
            price,
            quantity: 10,
            is_available: true,
            category_id,
            brand_id: None,
            slug: String::new(),
        },
    )
    .unwrap()
}

#[test]
#[ignore = "requires PostgreSQL"]
fn slug_is_derived_once_and_then_kept() {
    connection().test_transaction::<_, Error, _>(|conn| {
        let cat = category(conn, "Gaming Laptops");
        assert_eq!(cat.slug.as_deref(), Some("gaming-laptops"));

        let renamed = update_category(
            conn,
            cat.id,
            UpdateCategory { title: Some("Office Laptops".into()), slug: None },
        )?;
        assert_eq!(renamed.slug.as_deref(), Some("gaming-laptops"));

        let cleared = update_category(
            conn,
            cat.id,
            UpdateCategory { title: None, slug: Some(String::new()) },
        )?;
        assert_eq!(cleared.slug.as_deref(), Some("office-laptops"));

        let blank = update_category(
            conn,
            cat.id,
            UpdateCategory { title: Some("Work Laptops".into()), slug: Some("   ".into()) },
        )?;
        assert_eq!(blank.slug.as_deref(), Some("work-laptops"));

        let brand = create_brand(conn, NewBrand { title: "Acme Corp".into(), slug: Some("acme".into()) })?;
        assert_eq!(brand.slug.as_deref(), Some("acme"));
        let brand = create_brand(conn, NewBrand { title: "Crème Brûlée & Co".into(), slug: None })?;
        assert_eq!(brand.slug.as_deref(), Some("creme-brulee-co"));
        let brand = update_brand(conn, brand.id, UpdateBrand { title: Some("Brûlée Bros".into()), slug: Some(String::new()) })?;
        assert_eq!(brand.slug.as_deref(), Some("brulee-bros"));

        let p = product(conn, cat.id, "Ultra Book 14", 1000);
        assert_eq!(p.slug, "ultra-book-14");
        let p = update_product(conn, p.id, UpdateProduct { price: Some(900), ..Default::default() })?;
        assert_eq!(p.slug, "ultra-book-14");
        assert_eq!(get_product_by_slug(conn, "ultra-book-14")?.id, p.id);
        Ok(())
    });
}

#[test]
#[ignore = "requires PostgreSQL"]
fn order_totals_follow_line_items() {
    connection().test_transaction::<_, Error, _>(|conn| {
        let cat = category(conn, "Phones");
        let phone = product(conn, cat.id, "Phone X", 300);
        let case = product(conn, cat.id, "Phone Case", 25);

        let order = create_order(
            conn,
            NewOrder { user_id: None, transaction_id: "tx-42".into(), shipping: true },
        )?;
        assert!(get_order_lines(conn, order.id)?.is_empty());
        assert_eq!(cart_total_quantity(&[]), 0);

        add_order_product(conn, NewOrderProduct { order_id: Some(order.id), product_id: Some(phone.id), quantity: 2 })?;
        let case_line = add_order_product(
            conn,
            NewOrderProduct { order_id: Some(order.id), product_id: Some(case.id), quantity: 3 },
        )?;

        let lines = get_order_lines(conn, order.id)?;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].total_price(), 600);
        assert_eq!(cart_total_quantity(&lines), 5);
        assert_eq!(cart_total_price(&lines), 675);

        update_order_product_quantity(conn, case_line.id, 1)?;
        let lines = get_order_lines(conn, order.id)?;
        assert_eq!(cart_total_price(&lines), 625);
        Ok(())
    });
}

#[test]
#[ignore = "requires PostgreSQL"]
fn photos_fall_back_until_images_exist() {
    connection().test_transaction::<_, Error, _>(|conn| {
        let cat = category(conn, "Lamps");
        let lamp = product(conn, cat.id, "Desk Lamp", 40);

        let images = get_product_images(conn, &lamp)?;
        assert_eq!(first_photo(&images, "/media/"), FALLBACK_PHOTO_URL);

        add_product_image(conn, NewProductImage { photo: Some("products/one.jpg".into()), product_id: lamp.id })?;
        let images = get_product_images(conn, &lamp)?;
        assert_eq!(first_photo(&images, "/media/"), "/media/products/one.jpg");
        assert_eq!(second_photo(&images, "/media/"), FALLBACK_SECOND_PHOTO);

        add_product_image(conn, NewProductImage { photo: Some("products/two.jpg".into()), product_id: lamp.id })?;
        let images = get_product_images(conn, &lamp)?;
        assert_eq!(second_photo(&images, "/media/"), "/media/products/two.jpg");
        Ok(())
    });
}

#[test]
#[ignore = "requires PostgreSQL"]
fn deletes_cascade_or_detach_per_relation() {
    connection().test_transaction::<_, Error, _>(|conn| {
        let cat = category(conn, "Garden");
        let brand = create_brand(conn, NewBrand { title: "Green Co".into(), slug: None })?;
        let hose = product(conn, cat.id, "Hose", 15);
        let hose = update_product(conn, hose.id, UpdateProduct { brand_id: Some(Some(brand.id)), ..Default::default() })?;
        let image = add_product_image(conn, NewProductImage { photo: Some("products/hose.jpg".into()), product_id: hose.id })?;

        let order = create_order(conn, NewOrder { user_id: None, transaction_id: "tx-7".into(), shipping: false })?;
        let line = add_order_product(conn, NewOrderProduct { order_id: Some(order.id), product_id: Some(hose.id), quantity: 1 })?;

        assert_eq!(brand.slug.as_deref(), Some("green-co"));
        delete_brand(conn, brand.id)?;
        assert_eq!(get_product(conn, hose.id)?.brand_id, None);

        delete_category(conn, cat.id)?;
        assert!(matches!(get_product(conn, hose.id), Err(Error::NotFound)));
        assert!(matches!(get_product_image(conn, image.id), Err(Error::NotFound)));

        let line = get_order_product(conn, line.id)?;
        assert_eq!(line.product_id, None);
        let lines = get_order_lines(conn, order.id)?;
        assert_eq!(cart_total_price(&lines), 0);
        assert_eq!(cart_total_quantity(&lines), 1);

        delete_order(conn, order.id)?;
        assert_eq!(get_order_product(conn, line.id)?.order_id, None);
        Ok(())
    });
}

#[test]
#[ignore = "requires PostgreSQL"]
fn product_filters_and_sorting() {
    connection().test_transaction::<_, Error, _>(|conn| {
        let cat = category(conn, "Books");
        product(conn, cat.id, "Rust in Action", 45);
        product(conn, cat.id, "Programming Rust", 55);
        product(conn, cat.id, "Cooking Basics", 20);

        let query = ProductQuery {
            category_id: Some(cat.id),
            search_term: Some("rust".into()),
            sort_by: Some("price".into()),
            sort_order: Some("desc".into()),
            ..Default::default()
        };
        let found = get_all_products(conn, &query)?;
        let titles: Vec<_> = found.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Programming Rust", "Rust in Action"]);

        let cheap = get_all_products(conn, &ProductQuery { category_id: Some(cat.id), max_price: Some(30), ..Default::default() })?;
        assert_eq!(cheap.len(), 1);
        Ok(())
    });
}

#[test]
#[ignore = "requires PostgreSQL"]
fn search_treats_wildcards_literally() {
    connection().test_transaction::<_, Error, _>(|conn| {
        let cat = category(conn, "Shirts");
        product(conn, cat.id, "100% Cotton Tee", 15);
        product(conn, cat.id, "1000 Thread Sheet", 80);
        product(conn, cat.id, "snake_case Mug", 9);
        product(conn, cat.id, "snakeXcase Poster", 12);

        let search = |term: &str| ProductQuery {
            category_id: Some(cat.id),
            search_term: Some(term.into()),
            ..Default::default()
        };
        let titles = |found: Vec<Product>| found.into_iter().map(|p| p.title).collect::<Vec<_>>();

        assert_eq!(titles(get_all_products(conn, &search("100%"))?), ["100% Cotton Tee"]);
        assert_eq!(titles(get_all_products(conn, &search("snake_case"))?), ["snake_case Mug"]);
        Ok(())
    });
}

#[test]
#[ignore = "requires PostgreSQL"]
fn shipping_addresses_attach_to_orders() {
    connection().test_transaction::<_, Error, _>(|conn| {
        let customer = create_customer(
            conn,
            NewCustomer {
                firstname: "Ada".into(),
                lastname: "Lovelace".into(),
                email: "ada@example.com".into(),
                company_name: "Engines Ltd".into(),
            },
        )?;
        let order = create_order(conn, NewOrder { user_id: None, transaction_id: "tx-9".into(), shipping: true })?;
        create_shipping_address(
            conn,
            NewShippingAddress {
                country: "UK".into(),
                address: "1 Analytical St".into(),
                town: "London".into(),
                zip_code: "N1".into(),
                phone: "+441234567".into(),
                comment: None,
                customer_id: Some(customer.id),
                order_id: Some(order.id),
            },
        )?;

        assert_eq!(get_shipping_addresses_for_order(conn, order.id)?.len(), 1);

        delete_customer(conn, customer.id)?;
        let addresses = get_shipping_addresses_for_order(conn, order.id)?;
        assert_eq!(addresses[0].customer_id, None);
        Ok(())
    });
}
