diesel::table! {
    categories (id) {
        id -> Int4,
        title -> Varchar,
        slug -> Nullable<Varchar>,
    }
}

diesel::table! {
    brands (id) {
        id -> Int4,
        title -> Varchar,
        slug -> Nullable<Varchar>,
    }
}

diesel::table! {
    products (id) {
        id -> Int4,
        title -> Varchar,
        descr -> Text,
        price -> Int4,
        quantity -> Int4,
        is_available -> Bool,
        category_id -> Int4,
        brand_id -> Nullable<Int4>,
        slug -> Varchar,
    }
}

diesel::table! {
    product_images (id) {
        id -> Int4,
        photo -> Nullable<Varchar>,
        product_id -> Int4,
    }
}

diesel::table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
    }
}

diesel::table! {
    orders (id) {
        id -> Int4,
        user_id -> Nullable<Int4>,
        order_date -> Timestamp,
        transaction_id -> Varchar,
        shipping -> Bool,
    }
}

diesel::table! {
    order_products (id) {
        id -> Int4,
        order_id -> Nullable<Int4>,
        product_id -> Nullable<Int4>,
        quantity -> Int4,
        added_at -> Timestamp,
    }
}

diesel::table! {
    customers (id) {
        id -> Int4,
        firstname -> Varchar,
        lastname -> Varchar,
        email -> Varchar,
        company_name -> Varchar,
    }
}

diesel::table! {
    shipping_addresses (id) {
        id -> Int4,
        country -> Varchar,
        address -> Varchar,
        town -> Varchar,
        zip_code -> Varchar,
        phone -> Varchar,
        comment -> Nullable<Text>,
        customer_id -> Nullable<Int4>,
        order_id -> Nullable<Int4>,
    }
}

diesel::joinable!(products -> categories (category_id));
diesel::joinable!(products -> brands (brand_id));
diesel::joinable!(product_images -> products (product_id));
diesel::joinable!(orders -> users (user_id));
diesel::joinable!(order_products -> orders (order_id));
diesel::joinable!(order_products -> products (product_id));
diesel::joinable!(shipping_addresses -> customers (customer_id));
diesel::joinable!(shipping_addresses -> orders (order_id));

diesel::allow_tables_to_appear_in_same_query!(
    categories,
    brands,
    products,
    product_images,
    users,
    orders,
    order_products,
    customers,
    shipping_addresses,
);
