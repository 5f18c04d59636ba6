use super::super::Error;
use serde::de::DeserializeOwned;

pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

pub enum Response<T> {
    Success(Inner<T>),
    Error(ErrorResponse),
    Invalid(Error),
}

pub struct Inner<T> {
    pub payload: T,
    pub status: u16,
}

impl<T> Response<T> {
    pub fn collect(self) -> Result<T, Error> {
        match self {
            Response::Success(response) => Ok(response.payload),
            Response::Error(response) => Err(Error::GenericResponseError {
                status: response.status,
                message: response.message,
            }),
            Response::Invalid(err) => Err(err),
        }
    }
}

pub trait AsyncFrom<T>: Sized {
    async fn async_from(value: T) -> Self;
}

impl<T> AsyncFrom<reqwest::Response> for Response<T>
where
    T: DeserializeOwned,
{
    async fn async_from(value: reqwest::Response) -> Self {
        let status = value.status().as_u16();

        let text = match value.text().await {
            Ok(text) => text,
            Err(cause) => return Response::Invalid(Error::ReadResponseTextError { cause }),
        };

        if !(200..300).contains(&status) {
            return Response::Error(ErrorResponse {
                status,
                message: text,
            });
        }

        match serde_json::from_str::<T>(&text) {
            Ok(payload) => Response::Success(Inner { payload, status }),
            Err(cause) => Response::Invalid(Error::ParseResponseError { cause }),
        }
    }
}
