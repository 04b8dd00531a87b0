/// Alpha Vantage 每日行情
pub mod alphavantage;
/// News API 新聞
pub mod newsapi;

#[cfg(test)]
pub(crate) mod stub {
    use axum::Router;

    /// 在本機隨機埠啟動假的上游服務，回傳 base url
    pub async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub server");
        let addr = listener.local_addr().expect("stub server addr");

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub server");
        });

        format!("http://{}", addr)
    }
}
