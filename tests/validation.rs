use food_marketplace::{
    dto::{food::NewFoodItem, orders::CartLine},
    error::AppError,
    routes::params::Pagination,
    services::{
        food_service::{sanitize_file_name, validate_new_food},
        order_service::validate_cart,
    },
};

fn line(food_item_id: i32, quantity: i32) -> CartLine {
    CartLine {
        food_item_id,
        quantity,
    }
}

fn upload() -> NewFoodItem {
    NewFoodItem {
        name: "Curry Puff".into(),
        quantity: 10,
        price: 150,
        description: "Baked this morning".into(),
        image_name: "puff.jpg".into(),
        image_bytes: vec![0xff, 0xd8, 0xff],
    }
}

#[test]
fn cart_must_have_positive_lines() {
    assert!(matches!(validate_cart(&[]), Err(AppError::BadRequest(_))));
    assert!(matches!(
        validate_cart(&[line(1, 2), line(2, 0)]),
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        validate_cart(&[line(1, -3)]),
        Err(AppError::BadRequest(_))
    ));
    assert!(validate_cart(&[line(1, 2), line(1, 1)]).is_ok());
}

#[test]
fn cart_line_accepts_legacy_id_field() {
    let line: CartLine = serde_json::from_str(r#"{"id": 7, "quantity": 2}"#).unwrap();
    assert_eq!(line.food_item_id, 7);
    assert_eq!(line.quantity, 2);
}

#[test]
fn upload_requires_every_field() {
    assert!(validate_new_food(&upload()).is_ok());

    let mut missing_image = upload();
    missing_image.image_bytes.clear();
    assert!(matches!(validate_new_food(&missing_image), Err(AppError::BadRequest(_))));

    let mut blank_name = upload();
    blank_name.name = "   ".into();
    assert!(validate_new_food(&blank_name).is_err());

    let mut no_stock = upload();
    no_stock.quantity = 0;
    assert!(validate_new_food(&no_stock).is_err());

    let mut negative_price = upload();
    negative_price.price = -1;
    assert!(validate_new_food(&negative_price).is_err());
}

#[test]
fn file_names_cannot_escape_upload_dir() {
    assert_eq!(sanitize_file_name("photo.png"), "photo.png");
    assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
    assert_eq!(sanitize_file_name("C:\\Users\\me\\lunch box.jpg"), "lunch_box.jpg");
    assert_eq!(sanitize_file_name(".."), "image");
    assert_eq!(sanitize_file_name(".hidden"), "hidden");
    assert_eq!(sanitize_file_name(""), "image");
}

#[test]
fn pagination_is_clamped() {
    let p = Pagination::default();
    assert_eq!(p.normalize(), (1, 20, 0));

    let p = Pagination {
        page: Some(3),
        per_page: Some(10),
    };
    assert_eq!(p.normalize(), (3, 10, 20));

    let p = Pagination {
        page: Some(0),
        per_page: Some(1000),
    };
    assert_eq!(p.normalize(), (1, 100, 0));

    let p = Pagination {
        page: Some(i64::MAX),
        per_page: Some(20),
    };
    assert_eq!(p.normalize(), (i64::MAX, 20, i64::MAX));
}
