// src/data/fetcher.rs

//! InfluxDB 数据获取
//!
//! 每个 bucket 通过 Flux 查询取最近 15 分钟内的最后一条记录，
//! 响应为带注解的 CSV 文本，按固定的行号和列号取值：
//! - 温湿度 bucket：第 1 行为湿度，第 2 行为温度
//! - CO2 bucket：第 1 行为浓度
//!
//! 值位于每行倒数第 4 列

use serde::Serialize;

use crate::common::config::InfluxConfig;
use crate::common::error::FetchError;
use crate::common::types::{ClimateReading, Readings, Tenths, parse_ppm};
use crate::driver::http_client::{HttpClient, HttpRequest};

/// 值所在列（从行尾倒数）
const VALUE_COLUMN_FROM_END: usize = 4;

const HUMIDITY_ROW: usize = 1;
const TEMPERATURE_ROW: usize = 2;
const CO2_ROW: usize = 1;

/// 查询请求体
#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
}

/// 构造取最近一条记录的 Flux 查询
pub fn flux_query(bucket: &str) -> String {
    format!(
        "from(bucket: \"{}\") |> range(start: -15m) |> last()",
        bucket
    )
}

/// 取 CSV 文本中指定行倒数第 `column_from_end` 列
pub fn field_from_end(body: &str, row: usize, column_from_end: usize) -> Result<&str, FetchError> {
    let malformed = FetchError::MalformedResponse {
        row,
        column_from_end,
    };

    let line = body.split('\n').nth(row).ok_or(malformed.clone())?;
    let fields: Vec<&str> = line.split(',').collect();

    if column_from_end == 0 || column_from_end > fields.len() {
        return Err(malformed);
    }
    Ok(fields[fields.len() - column_from_end])
}

pub struct InfluxFetcher<C: HttpClient> {
    client: C,
    config: InfluxConfig,
}

impl<C: HttpClient> InfluxFetcher<C> {
    pub fn new(client: C, config: InfluxConfig) -> Self {
        Self { client, config }
    }

    pub fn query_url(&self, bucket: &str) -> String {
        format!(
            "{}/api/v2/query?org={}&bucket={}&precision=s",
            self.config.url, self.config.org, bucket
        )
    }

    /// 对指定 bucket 执行查询，返回响应正文
    fn query(&mut self, bucket: &str) -> Result<String, FetchError> {
        let flux = flux_query(bucket);
        let body = serde_json::to_string(&QueryBody { query: &flux })
            .map_err(|e| FetchError::Transport(format!("encode query: {}", e)))?;

        let request = HttpRequest::new(self.query_url(bucket))
            .with_header("Content-Type", "application/json")
            .with_header("Authorization", format!("Token {}", self.config.token))
            .with_body(body);

        let response = self.client.post(&request)?;
        if response.status != 200 {
            log::error!("HTTP Error: {} for bucket {}", response.status, bucket);
            log::error!("Response Content: {}", response.body);
            return Err(FetchError::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response.body)
    }

    /// 获取温度和湿度
    pub fn fetch_climate(&mut self) -> Result<ClimateReading, FetchError> {
        let bucket = self.config.bucket;
        let body = self.query(bucket)?;

        let humidity = field_from_end(&body, HUMIDITY_ROW, VALUE_COLUMN_FROM_END)?;
        let temperature = field_from_end(&body, TEMPERATURE_ROW, VALUE_COLUMN_FROM_END)?;

        let reading = ClimateReading {
            temperature: Tenths::parse_rounded(temperature)?,
            humidity: Tenths::parse_rounded(humidity)?,
        };
        log::debug!(
            "Climate reading: {} C, {} %",
            reading.temperature,
            reading.humidity
        );
        Ok(reading)
    }

    /// 获取 CO2 浓度（ppm）
    pub fn fetch_co2(&mut self) -> Result<i32, FetchError> {
        let bucket = self.config.bucket_co2;
        let body = self.query(bucket)?;

        let co2 = parse_ppm(field_from_end(&body, CO2_ROW, VALUE_COLUMN_FROM_END)?)?;
        log::debug!("CO2 reading: {} ppm", co2);
        Ok(co2)
    }

    /// 获取全部读数
    ///
    /// 两个查询互不影响，都会被执行；任一失败则返回第一个错误
    pub fn fetch_all(&mut self) -> Result<Readings, FetchError> {
        let co2 = self.fetch_co2().inspect_err(|e| {
            log::warn!("Error in CO2 query: {}", e);
        });
        let climate = self.fetch_climate().inspect_err(|e| {
            log::warn!("Error in climate query: {}", e);
        });

        match (co2, climate) {
            (Ok(co2), Ok(climate)) => Ok(Readings::new(climate, co2)),
            (Err(e), _) | (_, Err(e)) => {
                log::error!("Failed to retrieve the latest entry: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::driver::http_client::HttpResponse;

    const CLIMATE_BODY: &str = ",result,table,_start,_stop,_time,_value,_field,_measurement,host\r\n\
        ,_result,0,2024-05-01T10:00:00Z,2024-05-01T10:15:00Z,2024-05-01T10:14:30Z,40.04,humidity,climate,pi\r\n\
        ,_result,1,2024-05-01T10:00:00Z,2024-05-01T10:15:00Z,2024-05-01T10:14:30Z,23.456,temperature,climate,pi\r\n\
        \r\n";

    const CO2_BODY: &str = ",result,table,_start,_stop,_time,_value,_field,_measurement,host\r\n\
        ,_result,0,2024-05-01T10:00:00Z,2024-05-01T10:15:00Z,2024-05-01T10:14:30Z,512.3,co2,air,pi\r\n\
        \r\n";

    #[derive(Debug, Default)]
    struct ScriptedClient {
        responses: VecDeque<Result<HttpResponse, FetchError>>,
        requests: Vec<HttpRequest>,
    }

    impl ScriptedClient {
        fn respond(mut self, status: u16, body: &str) -> Self {
            self.responses.push_back(Ok(HttpResponse {
                status,
                body: body.into(),
            }));
            self
        }

        fn fail(mut self, message: &str) -> Self {
            self.responses
                .push_back(Err(FetchError::Transport(message.into())));
            self
        }
    }

    impl HttpClient for ScriptedClient {
        fn post(&mut self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
            self.requests.push(request.clone());
            self.responses
                .pop_front()
                .unwrap_or(Err(FetchError::Transport("no scripted response".into())))
        }
    }

    fn config() -> InfluxConfig {
        InfluxConfig {
            url: "http://influx.local:8086",
            org: "home",
            token: "secret",
            bucket: "climate",
            bucket_co2: "co2",
        }
    }

    #[test]
    fn builds_query_and_url() {
        let fetcher = InfluxFetcher::new(ScriptedClient::default(), config());
        assert_eq!(
            flux_query("climate"),
            r#"from(bucket: "climate") |> range(start: -15m) |> last()"#
        );
        assert_eq!(
            fetcher.query_url("co2"),
            "http://influx.local:8086/api/v2/query?org=home&bucket=co2&precision=s"
        );
    }

    #[test]
    fn sends_authenticated_json_post() {
        let client = ScriptedClient::default().respond(200, CO2_BODY);
        let mut fetcher = InfluxFetcher::new(client, config());
        fetcher.fetch_co2().unwrap();

        let request = &fetcher.client.requests[0];
        assert_eq!(request.header("Authorization"), Some("Token secret"));
        assert_eq!(request.header("Content-Type"), Some("application/json"));

        let body: serde_json::Value =
            serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["query"], flux_query("co2"));
    }

    #[test]
    fn parses_climate_rows() {
        let client = ScriptedClient::default().respond(200, CLIMATE_BODY);
        let mut fetcher = InfluxFetcher::new(client, config());
        let reading = fetcher.fetch_climate().unwrap();

        assert_eq!(reading.temperature, Tenths::from_tenths(235));
        assert_eq!(reading.humidity, Tenths::from_tenths(400));
    }

    #[test]
    fn truncates_co2() {
        let client = ScriptedClient::default().respond(200, CO2_BODY);
        let mut fetcher = InfluxFetcher::new(client, config());
        assert_eq!(fetcher.fetch_co2(), Ok(512));
    }

    #[test]
    fn non_200_is_status_error() {
        let client = ScriptedClient::default().respond(401, "{\"code\":\"unauthorized\"}");
        let mut fetcher = InfluxFetcher::new(client, config());
        assert_eq!(
            fetcher.fetch_co2(),
            Err(FetchError::Status {
                status: 401,
                body: "{\"code\":\"unauthorized\"}".into(),
            })
        );

        // 只有 200 算成功，其他 2xx 同样是错误
        let client = ScriptedClient::default().respond(204, "");
        let mut fetcher = InfluxFetcher::new(client, config());
        assert_eq!(
            fetcher.fetch_co2(),
            Err(FetchError::Status {
                status: 204,
                body: String::new(),
            })
        );
    }

    #[test]
    fn short_body_is_malformed_not_panic() {
        let header_only = ",result,table,_value\r\n";
        let client = ScriptedClient::default().respond(200, header_only);
        let mut fetcher = InfluxFetcher::new(client, config());
        assert_eq!(
            fetcher.fetch_climate(),
            Err(FetchError::MalformedResponse {
                row: HUMIDITY_ROW,
                column_from_end: VALUE_COLUMN_FROM_END,
            })
        );

        assert!(matches!(
            field_from_end("a\nb,c", 1, 4),
            Err(FetchError::MalformedResponse { .. })
        ));
        assert!(field_from_end("", 1, 4).is_err());
    }

    #[test]
    fn fetch_all_attempts_both_queries() {
        let client = ScriptedClient::default()
            .fail("connection reset")
            .respond(200, CLIMATE_BODY);
        let mut fetcher = InfluxFetcher::new(client, config());

        let error = fetcher.fetch_all().unwrap_err();
        assert_eq!(error, FetchError::Transport("connection reset".into()));
        assert_eq!(fetcher.client.requests.len(), 2);
    }

    #[test]
    fn fetch_all_combines_readings() {
        let client = ScriptedClient::default()
            .respond(200, CO2_BODY)
            .respond(200, CLIMATE_BODY);
        let mut fetcher = InfluxFetcher::new(client, config());

        assert_eq!(
            fetcher.fetch_all(),
            Ok(Readings {
                temperature: Tenths::from_tenths(235),
                humidity: Tenths::from_tenths(400),
                co2: 512,
            })
        );
    }
}
