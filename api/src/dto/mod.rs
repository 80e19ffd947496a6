//! Request and response bodies

pub mod auth;

pub use auth::{
    CheckCodeRequest, CheckCodeResponse, EmailExistRequest, ExistResponse, PhoneExistRequest,
    SendPhoneCodeRequest,
};
