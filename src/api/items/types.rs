use actix_multipart::{Multipart, MultipartError};
use actix_web::web;
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};

use crate::models::item::Item;

#[derive(Debug, Deserialize)]
pub struct ItemPath {
    pub item_id: String,
}

pub type RqItemId = web::Path<ItemPath>;

/// Externally-visible item representation; the pickup time is rendered back
/// in the same form it was submitted in and the image as its serving URL.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: String,
    pub location: String,
    pub condition: String,
    pub time_to_be_set_on_curb: String,
    pub image_url: String,
    pub created_at: i32,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        let time_to_be_set_on_curb = item.curb_time_string();
        ItemResponse {
            id: item.id,
            user_id: item.user_id,
            name: item.name,
            description: item.description,
            location: item.location,
            condition: item.condition,
            time_to_be_set_on_curb,
            image_url: format!("/uploads/{}", item.image_path),
            created_at: item.created_at,
        }
    }
}

#[derive(Debug)]
pub struct UploadedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Multipart form for item create/update. Every field is optional at the
/// parsing layer; the create handler enforces which ones are required.
#[derive(Debug, Default)]
pub struct ItemForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub condition: Option<String>,
    pub time_to_be_set_on_curb: Option<String>,
    pub image: Option<UploadedImage>,
}

impl ItemForm {
    pub async fn from_multipart(mut payload: Multipart) -> Result<Self, MultipartError> {
        let mut form = ItemForm::default();

        while let Some(mut field) = payload.try_next().await? {
            let field_name = field.name().to_string();
            let filename = field
                .content_disposition()
                .get_filename()
                .map(ToString::to_string);

            let mut data = Vec::new();
            while let Some(chunk) = field.try_next().await? {
                data.extend_from_slice(&chunk);
            }

            match field_name.as_str() {
                "file" => {
                    form.image = Some(UploadedImage {
                        filename: filename.unwrap_or_default(),
                        bytes: data,
                    });
                }
                "name" => form.name = into_text(data),
                "description" => form.description = into_text(data),
                "location" => form.location = into_text(data),
                "condition" => form.condition = into_text(data),
                "time_to_be_set_on_curb" => form.time_to_be_set_on_curb = into_text(data),
                _ => {}
            }
        }

        Ok(form)
    }
}

fn into_text(data: Vec<u8>) -> Option<String> {
    String::from_utf8(data).ok()
}
