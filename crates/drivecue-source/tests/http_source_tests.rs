//! `HttpSource` against a mock vehicle data service.

use std::time::Duration;

use drivecue_source::{HttpSource, HttpSourceConfig, SAMPLE_DOCUMENT, SampleSource};
use drivecue_telemetry::{
    Parameter, STATUS_NO_DATA, STATUS_RECEIVED, TelemetryClient, TelemetryError,
    TelemetrySource,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const VEHICLE: &str = "usSF-413";

fn response_for(vehicle_id: &str, createtime: &str, speed: f64) -> String {
    format!(
        "<response><carinfo><car><userid>{vehicle_id}</userid><vid>V1</vid></car><data>\
         <createtime>{createtime}</createtime>\
         <MapMatching><lat>34.659628</lat><lon>135.164106</lon></MapMatching>\
         <Spd>{speed}</Spd><BrkLiIntenReq>0</BrkLiIntenReq><PrkgLiIndcn>0</PrkgLiIndcn>\
         </data></carinfo></response>"
    )
}

fn source_for(server: &MockServer) -> Result<HttpSource, TelemetryError> {
    HttpSource::new(
        HttpSourceConfig::new(server.uri(), "KEY").with_timeout(Duration::from_millis(250)),
    )
}

#[tokio::test]
async fn query_sends_key_vehicle_and_parameters() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/DataSender/services/GetVehicleInfo"))
        .and(query_param("apilkey", "KEY"))
        .and(query_param("userid", VEHICLE))
        .and(query_param("Spd", "1"))
        .and(query_param("MapMatching", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(response_for(
                VEHICLE,
                "2013-11-01T12:23:58",
                42.5,
            )),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = source_for(&server)?;
    let records = source.query(VEHICLE, Parameter::ALL).await?;
    let record = records.first().ok_or("no record")?;
    assert_eq!(record.vehicle_id, VEHICLE);
    assert_eq!(record.fields.speed, Some(42.5));
    assert_eq!(record.fields.brake_on, Some(false));
    Ok(())
}

#[tokio::test]
async fn seek_and_reset_use_their_services() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/DataSender/services/SearchDataSeek"))
        .and(query_param("seekseconds", "470"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/DataSender/services/SearchDataReset"))
        .and(query_param("userid", VEHICLE))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let source = source_for(&server)?;
    source.seek(VEHICLE, 470).await?;
    source.reset(VEHICLE).await?;
    Ok(())
}

#[tokio::test]
async fn rejected_command_is_reported() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/DataSender/services/SearchDataSeek"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = source_for(&server)?;
    let result = source.seek(VEHICLE, 60).await;
    assert!(matches!(
        result,
        Err(TelemetryError::CommandRejected { ref command, .. }) if command == "SearchDataSeek"
    ));
    Ok(())
}

#[tokio::test]
async fn slow_service_times_out() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SAMPLE_DOCUMENT)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let source = source_for(&server)?;
    let result = source.query(VEHICLE, Parameter::ALL).await;
    assert_eq!(result, Err(TelemetryError::Timeout { timeout_ms: 250 }));
    Ok(())
}

#[tokio::test]
async fn error_status_and_empty_body_fail_the_query() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("userid", "down"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("userid", "empty"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let source = source_for(&server)?;
    assert!(matches!(
        source.query("down", Parameter::ALL).await,
        Err(TelemetryError::Transport(_))
    ));
    assert!(matches!(
        source.query("empty", Parameter::ALL).await,
        Err(TelemetryError::MalformedResponse { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn client_polls_through_http() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/DataSender/services/SearchDataSeek"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/DataSender/services/GetVehicleInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(response_for(
            VEHICLE,
            "2013-11-01T12:23:58",
            60.0,
        )))
        .mount(&server)
        .await;

    let client = TelemetryClient::new(VEHICLE, source_for(&server)?);
    let outcome = client.seek(800).await?;
    assert!(outcome.is_received());

    let snapshot = client.snapshot();
    assert_eq!(snapshot.status, STATUS_RECEIVED);
    assert_eq!(snapshot.time_s, 800);
    assert_eq!(snapshot.vid.as_deref(), Some("V1"));
    assert!((snapshot.speed - 60.0).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn client_reports_other_vehicles_as_no_data() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(response_for(
            "usSF-411",
            "2013-11-01T12:23:58",
            60.0,
        )))
        .mount(&server)
        .await;

    let client = TelemetryClient::new(VEHICLE, source_for(&server)?);
    client.poll().await?;
    assert_eq!(client.status(), STATUS_NO_DATA);
    Ok(())
}

#[tokio::test]
async fn sample_source_drives_the_client() -> TestResult {
    let client = TelemetryClient::new(VEHICLE, SampleSource::new());
    client.reset().await?;

    let snapshot = client.snapshot();
    assert_eq!(snapshot.status, STATUS_RECEIVED);
    assert!(snapshot.brake_on);
    assert!((snapshot.position.latitude - 34.659_628_333).abs() < 1e-9);
    assert_eq!(client.source().commands(), vec!["reset"]);
    Ok(())
}

#[tokio::test]
async fn broken_record_for_another_vehicle_does_not_hide_ours() -> TestResult {
    let document = "<response>\
                    <carinfo><car><userid>usSF-411</userid></car><data><Spd>7</Spd></data></carinfo>\
                    <carinfo><car><userid>usSF-413</userid></car><data>\
                    <createtime>2013-11-01T12:23:58</createtime><Spd>42</Spd></data></carinfo>\
                    </response>";
    let client = TelemetryClient::new(VEHICLE, SampleSource::with_document(document));
    let outcome = client.poll().await?;
    assert!(outcome.is_received());

    let snapshot = client.snapshot();
    assert_eq!(snapshot.status, STATUS_RECEIVED);
    assert!((snapshot.speed - 42.0).abs() < f64::EPSILON);
    Ok(())
}
