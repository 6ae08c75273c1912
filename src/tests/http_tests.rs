use super::fixtures::POSTNUMRE_JSON;
use crate::{
    AdgangsadresseQuery, AdresseQuery, ClientConfig, DawaError, DecodeError, HttpConnector, Kommune,
    PostnummerQuery, ReverseQuery,
};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves one canned response per connection, in order, and records the
/// request line of each request.
struct Responder {
    host: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Responder {
    async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let host = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = requests.clone();
        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }
                let head = String::from_utf8_lossy(&head);
                let line = head.lines().next().unwrap_or_default().to_string();
                seen.lock().unwrap().push(line);

                let response = format!(
                    "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });

        Self { host, requests }
    }

    fn request_lines(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn connector() -> HttpConnector {
    HttpConnector::new(&ClientConfig::default()).unwrap()
}

const ADRESSER_JSON: &str = r#"[{"href":"http://dawa.aws.dk/adresser/0a3f50a0-73ca-32b8-e044-0003ba298018","id":"0a3f50a0-73ca-32b8-e044-0003ba298018","status":1,"etage":"st","dør":"th","adressebetegnelse":"Abel Cathrines Gade 3A, st. th, 1654 København V","historik":{"oprettet":"2000-02-16T21:58:33.000","ændret":"2014-03-05T10:32:31.000"},"adgangsadresse":{"id":"0a3f507a-3669-32b8-e044-0003ba298018","husnr":"3A","vejstykke":{"kode":"0004","navn":"Abel Cathrines Gade"}}}]"#;

#[tokio::test]
async fn test_all_decodes_array_and_requests_noformat() {
    let server = Responder::start(vec![(200, ADRESSER_JSON)]).await;
    let found = AdresseQuery::new()
        .with_host(&server.host)
        .vejnavn(["Abel Cathrines Gade"])
        .all(&connector())
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].doer, "th");
    assert_eq!(found[0].adgangsadresse.husnr, "3A");
    assert_eq!(found[0].historik.aendret.timestamp(), 1394011951);

    let lines = server.request_lines();
    assert_eq!(
        lines,
        vec!["GET /adresser?vejnavn=Abel+Cathrines+Gade&noformat= HTTP/1.1".to_string()]
    );
}

#[tokio::test]
async fn test_service_error_is_decoded() {
    let body = r#"{"type":"ResourceNotFoundError","title":"The resource was not found","details":[{"id":"0a3f"}]}"#;
    let server = Responder::start(vec![(404, body)]).await;
    let err = AdresseQuery::new()
        .with_host(&server.host)
        .all(&connector())
        .await
        .unwrap_err();

    match err {
        DawaError::Service(e) => {
            assert_eq!(e.kind, "ResourceNotFoundError");
            assert_eq!(e.title, "The resource was not found");
            assert_eq!(e.details.len(), 1);
            assert_eq!(e.url, format!("{}/adresser?noformat=", server.host));
        }
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_without_body() {
    let server = Responder::start(vec![(500, "")]).await;
    let err = PostnummerQuery::new()
        .with_host(&server.host)
        .all(&connector())
        .await
        .unwrap_err();
    assert!(matches!(err, DawaError::RequestFailed { .. }), "{err:?}");
}

#[tokio::test]
async fn test_error_status_with_unexpected_body() {
    let server = Responder::start(vec![(503, "<html>busy</html>")]).await;
    let err = PostnummerQuery::new()
        .with_host(&server.host)
        .all(&connector())
        .await
        .unwrap_err();
    assert!(matches!(err, DawaError::RequestFailed { .. }), "{err:?}");
}

#[tokio::test]
async fn test_iter_streams_records() {
    let server = Responder::start(vec![(200, POSTNUMRE_JSON)]).await;
    let mut stream = PostnummerQuery::new()
        .with_host(&server.host)
        .iter(&connector())
        .await
        .unwrap();

    let mut numbers = Vec::new();
    while let Some(p) = stream.next().await.unwrap() {
        numbers.push(p.nr);
    }
    assert_eq!(numbers, vec!["1050", "1051", "8000"]);
}

#[tokio::test]
async fn test_first_on_empty_result() {
    let server = Responder::start(vec![(200, "[]")]).await;
    let found = AdgangsadresseQuery::new()
        .with_host(&server.host)
        .first(&connector())
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_first_ignores_bad_input_after_first_record() {
    let server = Responder::start(vec![(200, r#"[{"nr":"1050","navn":"København K"} ? garbage"#)]).await;
    let found = PostnummerQuery::new()
        .with_host(&server.host)
        .first(&connector())
        .await
        .unwrap();
    assert_eq!(found.unwrap().nr, "1050");
}

#[tokio::test]
async fn test_first_reports_error_before_any_record() {
    let server = Responder::start(vec![(200, "[ ? ]")]).await;
    let err = PostnummerQuery::new()
        .with_host(&server.host)
        .first(&connector())
        .await
        .unwrap_err();
    assert!(
        matches!(err, DawaError::Decode(DecodeError::Framing { .. })),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_connector_host_applies_to_lookups() {
    let server = Responder::start(vec![(200, POSTNUMRE_JSON)]).await;
    let http = HttpConnector::new(&ClientConfig {
        host: Some(server.host.clone()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(http.host(), Some(server.host.as_str()));

    let found = PostnummerQuery::get_postnr(&http, "1050").await.unwrap();
    assert_eq!(found.unwrap().navn, "København K");
    assert_eq!(
        server.request_lines(),
        vec!["GET /postnumre?nr=1050&noformat= HTTP/1.1".to_string()]
    );
}

#[tokio::test]
async fn test_geojson() {
    let body = r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"Point","coordinates":[12.5582458296225,55.6720594006065]},"properties":{"id":"0a3f507a-3669-32b8-e044-0003ba298018","husnr":"3A"}}]}"#;
    let server = Responder::start(vec![(200, body)]).await;
    let collection = AdgangsadresseQuery::new()
        .with_host(&server.host)
        .husnr(["3A"])
        .geojson(&connector())
        .await
        .unwrap();

    assert_eq!(collection.kind, "FeatureCollection");
    assert_eq!(collection.features.len(), 1);
    assert_eq!(collection.features[0].geometry["type"], "Point");
    assert_eq!(collection.features[0].properties["husnr"], "3A");
    assert_eq!(
        server.request_lines(),
        vec!["GET /adgangsadresser?husnr=3A&format=geojson HTTP/1.1".to_string()]
    );
}

#[tokio::test]
async fn test_reverse_lookup() {
    let body = r#"{"href":"http://dawa.aws.dk/kommuner/0101","kode":"0101","navn":"København"}"#;
    let server = Responder::start(vec![(200, body)]).await;
    let kommune = ReverseQuery::<Kommune>::new(12.58, 55.68, None)
        .with_host(&server.host)
        .fetch(&connector())
        .await
        .unwrap();

    assert_eq!(kommune.kode, "0101");
    assert_eq!(kommune.navn, "København");
    assert_eq!(
        server.request_lines(),
        vec!["GET /kommuner/reverse?x=12.58&y=55.68&noformat= HTTP/1.1".to_string()]
    );
}
