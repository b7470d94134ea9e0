//! [`ActorEntity`] implementations for [`Brand`] and [`Category`].
//!
//! Updates replace the whole record with the new name and optional field.

use super::error::TaxonomyError;
use crate::model::{Brand, BrandCreate, BrandId, Category, CategoryCreate, CategoryId};
use async_trait::async_trait;
use resource_actor::{ActorEntity, Immutable};

fn checked_name(kind: &'static str, name: String) -> Result<String, TaxonomyError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        Err(TaxonomyError::MissingName(kind))
    } else {
        Ok(name)
    }
}

#[async_trait]
impl ActorEntity for Brand {
    type Id = BrandId;
    type Create = BrandCreate;
    type Update = BrandCreate;
    type Action = Immutable;
    type ActionResult = ();
    type Context = ();
    type Error = TaxonomyError;

    fn from_create_params(id: BrandId, params: BrandCreate) -> Result<Self, Self::Error> {
        Ok(Brand {
            id,
            name: checked_name("Brand", params.name)?,
            logo: params.logo,
        })
    }

    async fn on_update(&mut self, update: BrandCreate, _ctx: &()) -> Result<(), Self::Error> {
        self.name = checked_name("Brand", update.name)?;
        self.logo = update.logo;
        Ok(())
    }

    async fn handle_action(&mut self, action: Immutable, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

#[async_trait]
impl ActorEntity for Category {
    type Id = CategoryId;
    type Create = CategoryCreate;
    type Update = CategoryCreate;
    type Action = Immutable;
    type ActionResult = ();
    type Context = ();
    type Error = TaxonomyError;

    fn from_create_params(id: CategoryId, params: CategoryCreate) -> Result<Self, Self::Error> {
        Ok(Category {
            id,
            name: checked_name("Category", params.name)?,
            description: params.description,
        })
    }

    async fn on_update(&mut self, update: CategoryCreate, _ctx: &()) -> Result<(), Self::Error> {
        self.name = checked_name("Category", update.name)?;
        self.description = update.description;
        Ok(())
    }

    async fn handle_action(&mut self, action: Immutable, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_trimmed_and_required() {
        let brand = Brand::from_create_params(
            BrandId(1),
            BrandCreate {
                name: "  Canon ".to_string(),
                logo: None,
            },
        )
        .unwrap();
        assert_eq!(brand.name, "Canon");

        let blank = Category::from_create_params(
            CategoryId(1),
            CategoryCreate {
                name: String::new(),
                description: None,
            },
        );
        assert_eq!(blank, Err(TaxonomyError::MissingName("Category")));
    }
}
