//! Price estimation from the command line.
//!
//! Reads one JSON property (or an array of them) from stdin and writes one
//! response body per line to stdout.
//!
//! ```text
//! echo '{"rooms_number": 3, "area": 120, "zip_code": 1000, "property_type": "HOUSE"}' | estimate
//! {"prediction":351234.56,"status_code":200}
//! ```

use std::io::{self, Read, Write};
use std::process::ExitCode;

use immo_estimator::{respond, telemetry, PricePipeline, PropertyRecord, Response, Settings};
use serde_json::Value;
use tracing::error;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            telemetry::init("info");
            error!(error = %err, "failed to load settings");
            return ExitCode::FAILURE;
        }
    };
    telemetry::init(&settings.log_filter);

    let pipeline = match PricePipeline::initialize(&settings) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            error!(error = %err, "startup failed");
            return ExitCode::FAILURE;
        }
    };

    match run(&pipeline) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "i/o failure");
            ExitCode::FAILURE
        }
    }
}

fn run(pipeline: &PricePipeline) -> io::Result<()> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let responses = handle(pipeline, &input);

    let mut out = io::stdout().lock();
    for response in responses {
        serde_json::to_writer(&mut out, &response)?;
        writeln!(out)?;
    }
    Ok(())
}

fn handle(pipeline: &PricePipeline, input: &str) -> Vec<Response> {
    let body: Value = match serde_json::from_str(input) {
        Ok(body) => body,
        Err(err) => return vec![Response::bad_request(format!("body: {}", err))],
    };

    match body {
        Value::Array(items) => {
            let parsed: Vec<Result<PropertyRecord, Response>> =
                items.into_iter().map(parse_record).collect();
            let records: Vec<PropertyRecord> = parsed
                .iter()
                .filter_map(|item| item.as_ref().ok().cloned())
                .collect();
            let mut predictions = pipeline.predict_batch(&records).into_iter();
            parsed
                .into_iter()
                .map(|item| match item {
                    Ok(_) => predictions
                        .next()
                        .map(respond)
                        .unwrap_or_else(Response::internal_error),
                    Err(response) => response,
                })
                .collect()
        }
        other => vec![match parse_record(other) {
            Ok(record) => respond(pipeline.predict(&record)),
            Err(response) => response,
        }],
    }
}

fn parse_record(value: Value) -> Result<PropertyRecord, Response> {
    serde_json::from_value(value).map_err(|err| Response::bad_request(format!("body: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use immo_estimator::model::{LinearModel, LinearParams};
    use immo_estimator::preprocessing::GeoIndex;
    use immo_estimator::FeatureSchema;
    use std::sync::Arc;

    fn pipeline() -> PricePipeline {
        let geo = GeoIndex::from_reader("Post code;Geo Point\n1000;50.84,4.35\n".as_bytes()).unwrap();
        let model = LinearModel::from_params(LinearParams {
            weights: vec![0.0; 15],
            bias: 12.0,
        })
        .unwrap();
        PricePipeline::new(FeatureSchema::immo_v1(), Arc::new(geo), Box::new(model)).unwrap()
    }

    #[test]
    fn test_malformed_body_is_bad_request() {
        let responses = handle(&pipeline(), "{not json");
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].status_code(), 400);
    }

    #[test]
    fn test_single_object() {
        let body = r#"{"rooms_number": 2, "area": 80, "zip_code": 1000, "property_type": "APARTMENT"}"#;
        let responses = handle(&pipeline(), body);
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].status_code(), 200);
    }

    #[test]
    fn test_array_keeps_order() {
        let body = r#"[
            {"rooms_number": 2, "area": 80, "zip_code": 1000, "property_type": "APARTMENT"},
            {"rooms_number": 2, "area": 80},
            {"rooms_number": 2, "area": 80, "zip_code": "abc", "property_type": "APARTMENT"},
            {"rooms_number": 5, "area": 200, "zip_code": "1000", "property_type": "HOUSE"}
        ]"#;
        let codes: Vec<u16> = handle(&pipeline(), body)
            .iter()
            .map(Response::status_code)
            .collect();
        assert_eq!(codes, vec![200, 400, 400, 200]);
    }
}
