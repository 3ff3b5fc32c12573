use crate::{Error, Gateway, Stations};

impl Gateway {
    /// Fetches the feed and parses every station in it.
    pub async fn get_stations(&self) -> Result<Stations, Error> {
        //http://data.goteborg.se/SelfServiceBicycleService/v1.0/Stations/{key}?getclosingperiods=true&format=Xml

        let text = self.get_feed().await?;
        Stations::parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Gateway, GatewayConfig, OpenStatus};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response and returns the base URL to reach it.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn local_gateway(base: String) -> Gateway {
        Gateway::new(GatewayConfig::new("key").with_base_url(base).without_proxy()).unwrap()
    }

    #[tokio::test]
    async fn fetches_and_parses() {
        let base = serve_once(
            "200 OK",
            "<ArrayOfStation xmlns=\"http://data.goteborg.se\"><Station>\
             <StationId>1</StationId><Name>Brunnsparken</Name><IsOpen>true</IsOpen>\
             </Station></ArrayOfStation>",
        )
        .await;
        let gateway = local_gateway(base);

        let stations = gateway.get_stations().await.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations.first().unwrap().name, "Brunnsparken");
        assert_eq!(stations.first().unwrap().is_open, OpenStatus::Open);
    }

    #[tokio::test]
    async fn error_status_is_an_api_error() {
        let base = serve_once("500 Internal Server Error", "boom").await;
        let gateway = local_gateway(base);

        let err = gateway.get_stations().await.unwrap_err();
        assert_eq!(err, Error::ApiError(500, "boom".into()));
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let base = serve_once("200 OK", "<ArrayOfStation><Station>").await;
        let gateway = local_gateway(base);

        let err = gateway.get_stations().await.unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[tokio::test]
    async fn plain_text_body_is_a_parse_error() {
        let base = serve_once("200 OK", "Service unavailable").await;
        let gateway = local_gateway(base);

        let err = gateway.get_stations().await.unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
        assert!(!err.is_fetch());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_fetch_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let gateway = local_gateway(format!("http://{}", addr));

        let err = gateway.get_feed().await.unwrap_err();
        assert!(matches!(err, Error::FetchError(_)));
    }
}
