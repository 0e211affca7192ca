use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub user_id: Uuid,
}
