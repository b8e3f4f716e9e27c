use std::convert::Infallible;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warp::reply::Json;
use warp::Filter;

use crate::hematology::classifier::Classifier;
use crate::hematology::ranges::REFERENCE_RANGES;
use crate::hematology::{CbcIndices, Diagnosis, Sex};

/// One classification submission: the sex category plus the four measured
/// values, already parsed to numbers by the client.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub sex: Sex,
    pub hemoglobin: f64,
    pub mcv: f64,
    pub mch: f64,
    pub mchc: f64,
}

/// Diagnosis plus the adapter-level timestamp of when it was produced.
#[derive(Debug, Serialize)]
pub struct DiagnosisPayload {
    pub evaluated_at: DateTime<Utc>,
    pub diagnosis: Diagnosis,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

pub struct RestApi {
    classifier: Arc<Classifier>,
}

impl RestApi {
    pub fn new(classifier: Arc<Classifier>) -> Self {
        RestApi { classifier }
    }

    pub fn routes(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        self.post_classify().or(self.get_reference_ranges())
    }

    fn post_classify(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let classifier = Arc::clone(&self.classifier);

        warp::path!("cbc" / "classify")
            .and(warp::post())
            .and(warp::body::json())
            .and_then(move |request: ClassifyRequest| {
                let classifier = Arc::clone(&classifier);
                async move {
                    let indices = CbcIndices {
                        hemoglobin: request.hemoglobin,
                        mcv: request.mcv,
                        mch: request.mch,
                        mchc: request.mchc,
                    };

                    match classifier.classify(request.sex, &indices) {
                        Ok(diagnosis) => {
                            log::info!("Classified sample: anemic={}", diagnosis.anemic);

                            let payload = DiagnosisPayload {
                                evaluated_at: Utc::now(),
                                diagnosis,
                            };
                            let response = ApiResponse {
                                status: "success".to_string(),
                                message: "Sample classified".to_string(),
                                data: Some(serde_json::to_value(payload).unwrap()),
                            };
                            Ok::<Json, Infallible>(warp::reply::json(&response))
                        }
                        Err(err) => {
                            log::warn!("Rejected sample: {}", err);

                            let response = ApiResponse {
                                status: "error".to_string(),
                                message: format!("Invalid input: {}", err),
                                data: None,
                            };
                            Ok::<Json, Infallible>(warp::reply::json(&response))
                        }
                    }
                }
            })
    }

    fn get_reference_ranges(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path!("cbc" / "reference-ranges")
            .and(warp::get())
            .map(|| {
                let response = ApiResponse {
                    status: "success".to_string(),
                    message: "Reference ranges".to_string(),
                    data: Some(serde_json::to_value(REFERENCE_RANGES).unwrap()),
                };
                warp::reply::json(&response)
            })
    }
}
