use areadesk_core::{
    CancellationToken, GatewayError, HierarchyGateway, HttpGateway, NewArea, NewFolder,
    NoticeLevel, ProjectExplorer,
};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Serves `responses` in order, one connection each, and forwards every
/// received request (head + body) to the returned channel.
fn serve(responses: Vec<(u16, &'static str)>) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let request = read_request(&mut stream);
            if sender.send(request).is_err() {
                return;
            }
            let response = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    (base_url, receiver)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let head_end = find_head_end(&data);
        if let Some(head_end) = head_end {
            let head = String::from_utf8_lossy(&data[..head_end]).to_string();
            let body_len = content_length(&head);
            if data.len() >= head_end + 4 + body_len {
                break;
            }
        }
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(read) => data.extend_from_slice(&chunk[..read]),
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

fn find_head_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|window| window == b"\r\n\r\n")
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

fn first_line(request: &str) -> &str {
    request.lines().next().unwrap_or_default()
}

#[test]
fn list_areas_follows_page_tokens() {
    let (base_url, requests) = serve(vec![
        (
            200,
            r#"{"areas":[{"name":"areas/1","displayName":"Home"}],"nextPageToken":"p2"}"#,
        ),
        (
            200,
            r#"{"areas":[{"name":"areas/2","displayName":"Work"}],"nextPageToken":""}"#,
        ),
    ]);
    let gateway = HttpGateway::new(base_url).with_page_size(1);

    let areas = gateway.list_areas(&CancellationToken::new()).unwrap();
    let names: Vec<&str> = areas.iter().map(|area| area.name.as_str()).collect();
    assert_eq!(names, vec!["areas/1", "areas/2"]);

    let first = requests.recv().unwrap();
    assert!(first_line(&first).starts_with("GET /api/v1/areas?"));
    assert!(first_line(&first).contains("pageSize=1"));
    assert!(!first_line(&first).contains("pageToken"));

    let second = requests.recv().unwrap();
    assert!(first_line(&second).contains("pageToken=p2"));
}

#[test]
fn repeated_page_token_stops_listing() {
    let (base_url, _requests) = serve(vec![
        (
            200,
            r#"{"folders":[{"name":"folders/a","area":"areas/1"}],"nextPageToken":"same"}"#,
        ),
        (
            200,
            r#"{"folders":[{"name":"folders/b","area":"areas/1"}],"nextPageToken":"same"}"#,
        ),
    ]);
    let gateway = HttpGateway::new(base_url);

    let folders = gateway.list_folders(&CancellationToken::new()).unwrap();
    assert_eq!(folders.len(), 2);
}

#[test]
fn page_cap_returns_collected_items() {
    let (base_url, _requests) = serve(vec![
        (200, r#"{"areas":[{"name":"areas/1"}],"nextPageToken":"a"}"#),
        (200, r#"{"areas":[{"name":"areas/2"}],"nextPageToken":"b"}"#),
    ]);
    let gateway = HttpGateway::new(base_url).with_max_pages(2);

    let areas = gateway.list_areas(&CancellationToken::new()).unwrap();
    assert_eq!(areas.len(), 2);
}

#[test]
fn missing_list_field_means_empty_list() {
    let (base_url, _requests) = serve(vec![(200, "{}")]);
    let gateway = HttpGateway::new(base_url);

    assert!(gateway
        .list_folders(&CancellationToken::new())
        .unwrap()
        .is_empty());
}

#[test]
fn create_area_posts_envelope() {
    let (base_url, requests) = serve(vec![(200, r#"{"name":"areas/work"}"#)]);
    let gateway = HttpGateway::new(base_url);
    let draft = NewArea::new(" Work ").unwrap().with_description("desk");

    gateway
        .create_area(&draft, &CancellationToken::new())
        .unwrap();

    let request = requests.recv().unwrap();
    assert!(first_line(&request).starts_with("POST /api/v1/areas "));
    assert!(request
        .to_ascii_lowercase()
        .contains("content-type: application/json"));
    assert!(request.ends_with(r#"{"area":{"displayName":"Work","description":"desk"}}"#));
}

#[test]
fn create_folder_failure_status_is_reported() {
    let (base_url, _requests) = serve(vec![(500, r#"{"message":"boom"}"#)]);
    let gateway = HttpGateway::new(base_url);
    let draft = NewFolder::new("Equipment", "areas/1").unwrap();

    let err = gateway
        .create_folder(&draft, &CancellationToken::new())
        .unwrap_err();
    match err {
        GatewayError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn success_status_with_non_json_body_is_failure() {
    let (base_url, _requests) = serve(vec![(200, "not json")]);
    let gateway = HttpGateway::new(base_url);

    let err = gateway.list_areas(&CancellationToken::new()).unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[test]
fn connection_refused_is_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let gateway = HttpGateway::new(base_url);

    let err = gateway.list_areas(&CancellationToken::new()).unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}

#[test]
fn cancelled_token_skips_network() {
    let gateway = HttpGateway::new("http://127.0.0.1:9");
    let cancel = CancellationToken::new();
    cancel.cancel();

    assert!(matches!(
        gateway.list_areas(&cancel),
        Err(GatewayError::Cancelled)
    ));
    assert!(matches!(
        gateway.create_area(&NewArea::new("Work").unwrap(), &cancel),
        Err(GatewayError::Cancelled)
    ));
}

#[test]
fn explorer_over_http_degrades_failed_folder_listing() {
    let (base_url, _requests) = serve(vec![
        (200, r#"{"areas":[{"name":"areas/1","displayName":"Home"}]}"#),
        (503, "unavailable"),
    ]);
    let mut explorer = ProjectExplorer::new(HttpGateway::new(base_url));
    explorer.mount();

    assert_eq!(explorer.areas().len(), 1);
    assert!(explorer.folders().is_empty());
    let notices = explorer.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert_eq!(notices[0].message, "Failed to load folders");
}
