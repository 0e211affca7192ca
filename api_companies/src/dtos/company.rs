use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};
use db::models::company::Company;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterCompanyRequest {
    #[serde(rename = "companyName")]
    pub company_name: Option<String>,
}

#[derive(Debug, MultipartForm)]
pub struct UpdateCompanyForm {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub website: Option<Text<String>>,
    pub location: Option<Text<String>>,
    /// Company logo; uploaded and stored as a public URL.
    pub file: Option<Bytes>,
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub company: Company,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<Company>,
    pub success: bool,
}
