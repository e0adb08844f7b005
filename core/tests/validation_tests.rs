// tests/validation_tests.rs
mod common;

use nexmart::validation::{IMAGE_REQUIRED, MAX_IMAGE_BYTES, VALIDATION_FAILED};
use nexmart::{ImageUpload, Money, ProductForm, ShopError};

fn image(content_type: &str, size: usize) -> ImageUpload {
  ImageUpload {
    file_name: "photo.png".to_string(),
    content_type: content_type.to_string(),
    bytes: vec![7; size],
  }
}

fn valid_form() -> ProductForm {
  let mut form = ProductForm::default();
  form.set_text("name", "Cyber-Visor X1".to_string());
  form.set_text("slug", "cyber-visor-x1".to_string());
  form.set_text("description", "AR visor".to_string());
  form.set_text("category", "  ".to_string());
  form.set_text("price", "799.99".to_string());
  form.set_text("inventory", "50".to_string());
  form.image = Some(image("image/png", 1024));
  form
}

fn errors_of(result: Result<nexmart::ValidatedProduct, ShopError>) -> (String, nexmart::FieldErrors) {
  match result {
    Err(ShopError::Validation { message, errors }) => (message, errors),
    other => panic!("expected validation error, got {:?}", other),
  }
}

#[test]
fn test_valid_create_form() {
  common::setup_tracing();
  let validated = valid_form().validate_create().unwrap();
  assert_eq!(validated.name, "Cyber-Visor X1");
  assert_eq!(validated.price, Money::from_cents(79_999));
  assert_eq!(validated.inventory, 50);
  assert_eq!(validated.description.as_deref(), Some("AR visor"));
  assert_eq!(validated.category, None, "blank optional text becomes absent");

  let (draft, upload) = validated.into_parts();
  assert!(draft.image_url.is_none());
  assert_eq!(upload.map(|u| u.len()), Some(1024));
}

#[test]
fn test_unknown_fields_are_ignored() {
  let mut form = valid_form();
  assert!(!form.set_text("colour", "red".to_string()));
  assert!(form.validate_create().is_ok());
}

#[test]
fn test_short_name_and_slug() {
  let mut form = valid_form();
  form.set_text("name", " ab ".to_string());
  form.set_text("slug", "x".to_string());

  let (message, errors) = errors_of(form.validate_create());
  assert_eq!(message, VALIDATION_FAILED);
  assert_eq!(errors.get("name").unwrap(), ["Name must be at least 3 characters"]);
  assert_eq!(errors.get("slug").unwrap(), ["Slug must be at least 3 characters"]);
  assert_eq!(errors.len(), 2);
}

#[test]
fn test_price_rules() {
  for (raw, expected) in [
    ("0", "Price must be greater than 0"),
    ("0.00", "Price must be greater than 0"),
    ("", "Price must be greater than 0"),
    ("   ", "Price must be greater than 0"),
    ("-5", "Price must be greater than 0"),
    ("abc", "Price must be a number"),
    ("1.999", "Price must be a number"),
  ] {
    let mut form = valid_form();
    form.set_text("price", raw.to_string());
    let (_, errors) = errors_of(form.validate_create());
    assert_eq!(errors.get("price").unwrap(), [expected], "price input '{}'", raw);
  }

  let mut form = valid_form();
  form.set_text("price", "0.01".to_string());
  assert_eq!(form.validate_create().unwrap().price.cents(), 1);
}

#[test]
fn test_inventory_rules() {
  for (raw, expected) in [
    ("-1", "Inventory cannot be negative"),
    ("-2.0", "Inventory cannot be negative"),
    ("2.5", "Inventory must be a whole number"),
    ("lots", "Inventory must be a whole number"),
  ] {
    let mut form = valid_form();
    form.set_text("inventory", raw.to_string());
    let (_, errors) = errors_of(form.validate_create());
    assert_eq!(errors.get("inventory").unwrap(), [expected], "inventory input '{}'", raw);
  }

  for (raw, expected) in [("0", 0), ("5.0", 5), (" 12 ", 12), ("", 0)] {
    let mut form = valid_form();
    form.set_text("inventory", raw.to_string());
    assert_eq!(form.validate_create().unwrap().inventory, expected, "inventory input '{}'", raw);
  }
}

#[test]
fn test_missing_numbers_count_as_zero() {
  let mut form = ProductForm::default();
  form.set_text("name", "Cyber-Visor X1".to_string());
  form.set_text("slug", "cyber-visor-x1".to_string());
  form.image = Some(image("image/png", 1024));

  let (_, errors) = errors_of(form.validate_create());
  assert_eq!(errors.get("price").unwrap(), ["Price must be greater than 0"]);
  assert!(errors.get("inventory").is_none());
  assert_eq!(errors.len(), 1);
}

#[test]
fn test_create_requires_an_image() {
  let mut form = valid_form();
  form.image = None;
  let (message, errors) = errors_of(form.validate_create());
  assert_eq!(message, IMAGE_REQUIRED);
  assert_eq!(errors.get("image").unwrap(), [IMAGE_REQUIRED]);

  // A zero-length upload counts as no upload.
  let mut form = valid_form();
  form.image = Some(image("image/png", 0));
  let (message, _) = errors_of(form.validate_create());
  assert_eq!(message, IMAGE_REQUIRED);
}

#[test]
fn test_missing_image_is_reported_alongside_other_errors() {
  let mut form = valid_form();
  form.image = None;
  form.set_text("name", "no".to_string());
  let (message, errors) = errors_of(form.validate_create());
  assert_eq!(message, IMAGE_REQUIRED);
  assert!(errors.contains("name"));
  assert!(errors.contains("image"));
}

#[test]
fn test_update_allows_missing_image() {
  let mut form = valid_form();
  form.image = None;
  let validated = form.validate_update().unwrap();
  assert!(validated.image.is_none());
}

#[test]
fn test_image_type_and_size_rules() {
  let mut form = valid_form();
  form.image = Some(image("image/gif", 10));
  let (_, errors) = errors_of(form.validate_update());
  assert_eq!(
    errors.get("image").unwrap(),
    ["Only .jpg, .jpeg, .png and .webp formats are supported."]
  );

  let mut form = valid_form();
  form.image = Some(image("image/jpeg", MAX_IMAGE_BYTES + 1));
  let (_, errors) = errors_of(form.validate_update());
  assert_eq!(errors.get("image").unwrap(), ["Max image size is 5MB."]);

  let mut form = valid_form();
  form.image = Some(image("IMAGE/WEBP", MAX_IMAGE_BYTES));
  assert!(form.validate_update().is_ok());
}

#[test]
fn test_image_extension() {
  assert_eq!(image("image/png", 1).extension(), Some("png"));
  let mut upload = image("image/png", 1);
  upload.file_name = "archive.tar.gz".to_string();
  assert_eq!(upload.extension(), Some("gz"));
  upload.file_name = "noext".to_string();
  assert_eq!(upload.extension(), None);
  upload.file_name = "trailing.".to_string();
  assert_eq!(upload.extension(), None);
}
