use std::{
    io::{Read, Write},
    net::TcpListener,
    thread::{self, JoinHandle},
};

use ev_aspects::nlp::classifier::{
    Classifier, ClassifierError, OllamaClassifier, FALLBACK_RESPONSE,
};

/// Serve a single canned HTTP response and hand back the request body.
fn one_shot_server(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api/generate", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });
    (url, handle)
}

fn read_request(stream: &mut impl Read) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                return String::from_utf8_lossy(&buf[end + 4..end + 4 + length]).into_owned();
            }
        }
    }
    String::new()
}

#[tokio::test]
async fn answer_is_trimmed_and_lowercased() {
    let (url, server) = one_shot_server(
        "200 OK",
        r#"{"model":"llama3.2","response":"  Positivos: Autonomia\nNegativos: NENHUM \n","done":true}"#,
    );
    let client = OllamaClassifier::new(url, "llama3.2").unwrap();

    let answer = client.classify("o carro anda muito").await;
    assert_eq!(answer, "positivos: autonomia\nnegativos: nenhum");

    let request: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
    assert_eq!(request["model"], "llama3.2");
    assert_eq!(request["stream"], false);
    assert!(request["prompt"]
        .as_str()
        .unwrap()
        .contains("Frase: \"o carro anda muito\""));
}

#[tokio::test]
async fn server_error_is_reported_and_falls_back() {
    let (url, server) = one_shot_server("500 Internal Server Error", r#"{"error":"model not loaded"}"#);
    let client = OllamaClassifier::new(url, "llama3.2").unwrap();

    let err = client.generate("qualquer").await.unwrap_err();
    assert!(matches!(err, ClassifierError::Status { .. }));
    server.join().unwrap();

    let (url, server) = one_shot_server("500 Internal Server Error", "{}");
    let client = OllamaClassifier::new(url, "llama3.2").unwrap();
    assert_eq!(client.classify("qualquer").await, FALLBACK_RESPONSE);
    server.join().unwrap();
}

#[tokio::test]
async fn malformed_body_falls_back() {
    let (url, server) = one_shot_server("200 OK", r#"{"done":true}"#);
    let client = OllamaClassifier::new(url, "llama3.2").unwrap();
    assert_eq!(client.classify("qualquer").await, FALLBACK_RESPONSE);
    server.join().unwrap();
}

#[tokio::test]
async fn unreachable_endpoint_falls_back() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = OllamaClassifier::new(format!("http://127.0.0.1:{port}/api/generate"), "llama3.2")
        .unwrap();
    assert_eq!(client.classify("qualquer").await, FALLBACK_RESPONSE);
}
