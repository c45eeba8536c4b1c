use clap::{Args, Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(name = "product-cli")]
#[command(about = "Command-line client for the Product API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[arg(short, long, env = "API_KEY", default_value = "my-secret-key")]
    key: String,

    /// Header carrying the API key
    #[arg(long, default_value = "x-api-key")]
    header: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products with optional filters and paging
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Show a single product
    Get { id: String },
    /// Create a product
    Create(ProductArgs),
    /// Update a product
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Delete a product
    Delete { id: String },
    /// Product counts per category
    Stats,
}

#[derive(Args)]
struct ProductArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    in_stock: Option<bool>,
}

impl ProductArgs {
    fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("name".into(), Value::from(self.name.clone()));
        body.insert("price".into(), price_value(self.price));
        if let Some(description) = &self.description {
            body.insert("description".into(), Value::from(description.clone()));
        }
        if let Some(category) = &self.category {
            body.insert("category".into(), Value::from(category.clone()));
        }
        if let Some(in_stock) = self.in_stock {
            body.insert("inStock".into(), Value::from(in_stock));
        }
        Value::Object(body)
    }
}

/// Send whole prices as integers so they round-trip without a trailing `.0`.
fn price_value(price: f64) -> Value {
    if price.fract() == 0.0 && price.abs() < i64::MAX as f64 {
        Value::from(price as i64)
    } else {
        Value::from(price)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::HeaderName::from_bytes(cli.header.as_bytes())?,
        HeaderValue::from_str(&cli.key)?,
    );

    let products_url = format!("{}/products", cli.url.trim_end_matches('/'));

    let request = match cli.command {
        Commands::List { category, search, page, limit } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(category) = category {
                query.push(("category", category));
            }
            if let Some(search) = search {
                query.push(("search", search));
            }
            if let Some(page) = page {
                query.push(("page", page.to_string()));
            }
            if let Some(limit) = limit {
                query.push(("limit", limit.to_string()));
            }
            client.get(&products_url).query(&query)
        }
        Commands::Get { id } => client.get(format!("{}/{}", products_url, id)),
        Commands::Create(fields) => client.post(&products_url).json(&fields.to_json()),
        Commands::Update { id, fields } => client
            .put(format!("{}/{}", products_url, id))
            .json(&fields.to_json()),
        Commands::Delete { id } => client.delete(format!("{}/{}", products_url, id)),
        Commands::Stats => client.get(format!("{}/stats", products_url)),
    };

    let res = request.headers(headers).send().await?;
    print_response(res).await?;

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if let Err(err) = ensure_success(status) {
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Err(err.into());
    }

    if status == reqwest::StatusCode::NO_CONTENT {
        println!("{}", status);
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Non-2xx statuses become an error so the process exits non-zero.
fn ensure_success(status: reqwest::StatusCode) -> Result<(), String> {
    if status.is_success() {
        Ok(())
    } else {
        Err(format!("API returned status {}", status))
    }
}
