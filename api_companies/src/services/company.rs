use common::error::{AppError, Res};
use db::dtos::company::NewCompany;
use db::models::company::Company;
use db::store::Store;
use uuid::Uuid;

/// Registers a company for the calling recruiter. Company names are
/// globally unique.
pub async fn register_company<S: Store + ?Sized>(
    store: &S,
    name: String,
    owner_id: Uuid,
) -> Res<Company> {
    if store.company_name_exists(&name).await? {
        return Err(AppError::Conflict(
            "You can't register the same company.".to_string(),
        ));
    }
    store
        .insert_company(NewCompany {
            name,
            user_id: owner_id,
        })
        .await
}

/// All companies owned by the caller. An empty result answers 404, which
/// the original wire contract requires.
pub async fn get_companies_for_owner<S: Store + ?Sized>(
    store: &S,
    owner_id: Uuid,
) -> Res<Vec<Company>> {
    let companies = store.find_companies_by_owner(owner_id).await?;
    if companies.is_empty() {
        return Err(AppError::NotFound("Companies not found.".to_string()));
    }
    Ok(companies)
}

pub async fn get_company_by_id<S: Store + ?Sized>(store: &S, id: Uuid) -> Res<Company> {
    store
        .find_company_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found.".to_string()))
}

/// Supplied fields of a company update; `None` leaves the field untouched.
#[derive(Debug, Default)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub logo: Option<String>,
}

/// Partial update by id. The caller's identity is checked by the route
/// guard but not compared with the stored owner, matching the observed
/// behavior this service replicates.
pub async fn update_company<S: Store + ?Sized>(
    store: &S,
    id: Uuid,
    changes: CompanyChanges,
) -> Res<Company> {
    let Some(mut company) = store.find_company_by_id(id).await? else {
        return Err(AppError::NotFound("Company not found.".to_string()));
    };

    if let Some(name) = changes.name {
        company.name = name;
    }
    if let Some(description) = changes.description {
        company.description = Some(description);
    }
    if let Some(website) = changes.website {
        company.website = Some(website);
    }
    if let Some(location) = changes.location {
        company.location = Some(location);
    }
    if let Some(logo) = changes.logo {
        company.logo = Some(logo);
    }

    store.update_company(company).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::mem::MemStore;

    #[tokio::test]
    async fn duplicate_company_name_is_a_conflict() {
        let store = MemStore::new();
        let owner = Uuid::new_v4();
        register_company(&store, "Acme".to_string(), owner)
            .await
            .unwrap();
        let err = register_company(&store, "Acme".to_string(), owner)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "You can't register the same company.");
    }

    #[tokio::test]
    async fn owner_with_no_companies_gets_not_found() {
        let store = MemStore::new();
        let err = get_companies_for_owner(&store, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_round_trip_changes_only_supplied_fields() {
        let store = MemStore::new();
        let owner = Uuid::new_v4();
        let company = register_company(&store, "Acme".to_string(), owner)
            .await
            .unwrap();

        let fetched = get_company_by_id(&store, company.id).await.unwrap();
        assert_eq!(fetched.name, "Acme");
        assert!(fetched.description.is_none());

        update_company(
            &store,
            company.id,
            CompanyChanges {
                description: Some("Rocket-powered logistics".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let fetched = get_company_by_id(&store, company.id).await.unwrap();
        assert_eq!(
            fetched.description.as_deref(),
            Some("Rocket-powered logistics")
        );
        assert_eq!(fetched.name, "Acme");
        assert_eq!(fetched.user_id, owner);
        assert!(fetched.website.is_none());
        assert!(fetched.logo.is_none());
    }

    #[tokio::test]
    async fn updating_an_unknown_company_is_not_found() {
        let store = MemStore::new();
        let err = update_company(&store, Uuid::new_v4(), CompanyChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
