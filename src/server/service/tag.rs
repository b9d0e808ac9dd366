use sea_orm::DatabaseConnection;

use crate::{
    model::recipe::TagDto,
    server::{
        data::tag::TagRepository,
        error::{resource::ResourceError, validation::ValidationError, Error},
        model::recipe::tag_dto,
    },
};

pub struct TagService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TagService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every tag ordered by ID, tags are not paginated
    pub async fn list_tags(&self) -> Result<Vec<TagDto>, Error> {
        let tags = TagRepository::new(self.db).get_all().await?;

        Ok(tags.into_iter().map(tag_dto).collect())
    }

    pub async fn get_tag(&self, tag_id: i32) -> Result<TagDto, Error> {
        let Some(tag) = TagRepository::new(self.db).get(tag_id).await? else {
            return Err(ResourceError::NotFound {
                resource: "Tag",
                id: tag_id,
            }
            .into());
        };

        Ok(tag_dto(tag))
    }
}

/// Normalize a `#RRGGBB` color to uppercase.
///
/// # Returns
/// - `Ok(String)` - Uppercase color including the leading `#`
/// - `Err(ValidationError::InvalidField)` - Not a 6 digit hex color
pub fn normalize_color(color: &str) -> Result<String, ValidationError> {
    let color = color.trim();
    let is_hex_color = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if !is_hex_color {
        return Err(ValidationError::InvalidField {
            field: "color",
            reason: format!("expected a #RRGGBB hex color, got `{}`", color),
        });
    }

    Ok(color.to_ascii_uppercase())
}
