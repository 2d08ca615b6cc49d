//! # HTML Views
//!
//! Server-rendered pages for the storefront. Every interpolated value goes
//! through [`escape`].

use axum::response::Html;
use cups_core::{ProductCatalog, TransactionListing};

/// What the result page shows after a submission got past validation
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    /// `Err` carries the user-facing reason the record was not stored
    pub saved: Result<(), String>,
    pub name: String,
    pub last_four: String,
    pub encrypted: String,
    pub tokenized: String,
    pub masked: String,
    /// (operation, reason) for each secrets call that failed
    pub failures: Vec<(&'static str, String)>,
}

/// Escape text for HTML element and attribute context
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title} | HashiCups</title>
    <style>
        body {{ font-family: system-ui; margin: 0; background: #f7f7f9; color: #1f2024; }}
        header {{ background: #1f2024; color: white; padding: 16px 32px; display: flex; justify-content: space-between; }}
        header a {{ color: #dce0e6; text-decoration: none; margin-left: 16px; }}
        main {{ max-width: 960px; margin: 32px auto; padding: 0 16px; }}
        .products {{ display: flex; flex-wrap: wrap; gap: 24px; }}
        .product {{ background: white; border-radius: 12px; padding: 24px; width: 180px; text-align: center; }}
        .product img {{ width: 120px; height: 120px; object-fit: contain; }}
        .card {{ background: white; border-radius: 12px; padding: 32px; }}
        .error {{ color: #c62828; }}
        .success {{ color: #2e7d32; }}
        label {{ display: block; margin-top: 12px; }}
        table {{ border-collapse: collapse; width: 100%; background: white; }}
        th, td {{ border: 1px solid #dce0e6; padding: 8px; text-align: left; font-family: monospace; }}
    </style>
</head>
<body>
    <header>
        <strong>HashiCups</strong>
        <nav><a href="/">Menu</a><a href="/alldata">Transactions</a></nav>
    </header>
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape(title),
        body = body
    ))
}

/// Product menu
pub fn index(catalog: &ProductCatalog) -> Html<String> {
    let cards: String = catalog
        .products()
        .iter()
        .map(|product| {
            format!(
                r#"        <div class="product">
            <img src="{image}" alt="{name}">
            <h3>{name}</h3>
            <form method="post" action="/buy">
                <input type="hidden" name="product" value="{name}">
                <button type="submit">Buy</button>
            </form>
        </div>
"#,
                image = escape(&product.image_path()),
                name = escape(&product.name)
            )
        })
        .collect();

    layout(
        "Menu",
        &format!(
            "        <h1>Our coffees</h1>\n        <div class=\"products\">\n{}        </div>\n",
            cards
        ),
    )
}

/// Empty payment form for `product`
pub fn payment_form(product: &str) -> Html<String> {
    layout(
        "Payment",
        &format!(
            r#"        <div class="card">
            <h1>Pay for {product}</h1>
            <form method="post" action="/submit">
                <label>Name on card <input type="text" name="name" required></label>
                <label>Card number <input type="text" name="number" inputmode="numeric" autocomplete="cc-number" required></label>
                <label>CVV <input type="text" name="cvv" inputmode="numeric" maxlength="4" required></label>
                <label>Expiry (MM/YY) <input type="text" name="expiry" placeholder="MM/YY" required></label>
                <button type="submit">Pay</button>
            </form>
        </div>
"#,
            product = escape(product)
        ),
    )
}

/// Submission rejected before anything was sent anywhere
pub fn payment_error(message: &str) -> Html<String> {
    layout(
        "Payment failed",
        &format!(
            r#"        <div class="card">
            <h1>Payment failed</h1>
            <p class="error">{message}</p>
            <p><a href="/">Back to the menu</a></p>
        </div>
"#,
            message = escape(message)
        ),
    )
}

/// Outcome of a processed submission
pub fn payment_result(receipt: &PaymentReceipt) -> Html<String> {
    let status = match &receipt.saved {
        Ok(()) => r#"<p class="success">Payment successful!</p>"#.to_string(),
        Err(reason) => format!(
            r#"<p class="error">Payment could not be recorded: {}</p>"#,
            escape(reason)
        ),
    };

    let failures: String = receipt
        .failures
        .iter()
        .map(|(operation, reason)| {
            format!(
                "                <li>{}: {}</li>\n",
                escape(operation),
                escape(reason)
            )
        })
        .collect();
    let failures = if failures.is_empty() {
        String::new()
    } else {
        format!(
            "            <ul class=\"error\">\n{}            </ul>\n",
            failures
        )
    };

    layout(
        "Payment",
        &format!(
            r#"        <div class="card">
            <h1>Thank you, {name}</h1>
            {status}
            <table>
                <tr><th>Card (last four)</th><td id="last-four">{last_four}</td></tr>
                <tr><th>Transit encrypted</th><td id="encrypted">{encrypted}</td></tr>
                <tr><th>Tokenized (FPE)</th><td id="tokenized">{tokenized}</td></tr>
                <tr><th>Masked</th><td id="masked">{masked}</td></tr>
            </table>
{failures}            <p><a href="/alldata">View all transactions</a></p>
        </div>
"#,
            name = escape(&receipt.name),
            status = status,
            last_four = escape(&receipt.last_four),
            encrypted = escape(&receipt.encrypted),
            tokenized = escape(&receipt.tokenized),
            masked = escape(&receipt.masked),
            failures = failures
        ),
    )
}

/// Generic table of stored transactions
pub fn all_data(listing: &TransactionListing) -> Html<String> {
    let header: String = listing
        .columns
        .iter()
        .map(|c| format!("<th>{}</th>", escape(c)))
        .collect();

    let rows: String = listing
        .rows
        .iter()
        .map(|record| {
            let cells: String = record
                .cells()
                .iter()
                .map(|c| format!("<td>{}</td>", escape(c)))
                .collect();
            format!("                <tr>{}</tr>\n", cells)
        })
        .collect();

    layout(
        "Transactions",
        &format!(
            r#"        <h1>Transactions</h1>
        <table>
            <thead><tr>{header}</tr></thead>
            <tbody>
{rows}            </tbody>
        </table>
"#,
            header = header,
            rows = rows
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cups_core::TransactionRecord;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#x27;y&#x27;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("Nomad Macchiato"), "Nomad Macchiato");
    }

    #[test]
    fn test_index_lists_every_product() {
        let Html(page) = index(&ProductCatalog::hashicups());
        for name in ["Consul Spiced Latte", "Nomad Macchiato", "Terraform Cold Brew", "Vault Vanilla Roast"] {
            assert!(page.contains(name), "missing {}", name);
        }
        assert!(page.contains("/static/coffee1.png"));
    }

    #[test]
    fn test_payment_form_escapes_product() {
        let Html(page) = payment_form("<b>Latte</b>");
        assert!(page.contains("Pay for &lt;b&gt;Latte&lt;/b&gt;"));
        assert!(page.contains(r#"name="expiry""#));
    }

    #[test]
    fn test_payment_result_lists_failures() {
        let receipt = PaymentReceipt {
            saved: Err("Could not reach the transaction database.".into()),
            name: "Alice".into(),
            last_four: "1111".into(),
            encrypted: "Error".into(),
            tokenized: "5555-6666-7777-8888".into(),
            masked: "Error".into(),
            failures: vec![("Encryption", "Secrets service is unreachable.".into())],
        };
        let Html(page) = payment_result(&receipt);
        assert!(page.contains(r#"<td id="encrypted">Error</td>"#));
        assert!(page.contains("Encryption: Secrets service is unreachable."));
        assert!(page.contains("Payment could not be recorded"));
    }

    #[test]
    fn test_all_data_table() {
        let listing = TransactionListing::new(vec![TransactionRecord {
            id: 3,
            name: Some("Alice".into()),
            card_number: Some("1111".into()),
            card_number_transit: Some("vault:v1:abc".into()),
            card_number_fpe: None,
            card_number_masked: Some("############1111".into()),
        }]);
        let Html(page) = all_data(&listing);
        assert!(page.contains("<th>card_number_transit</th>"));
        assert!(page.contains("<td>vault:v1:abc</td><td>None</td>"));
    }

    #[test]
    fn test_all_data_renders_null_name() {
        let listing = TransactionListing::new(vec![TransactionRecord {
            id: 4,
            name: None,
            card_number: None,
            card_number_transit: None,
            card_number_fpe: None,
            card_number_masked: None,
        }]);
        let Html(page) = all_data(&listing);
        assert!(page.contains("<tr><td>4</td><td>None</td><td>None</td>"));
    }
}
