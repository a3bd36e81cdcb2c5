//! Text report — ranked holdings followed by portfolio totals.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Portfolio, StockNo, Totals};

const RULE_WIDTH: usize = 40;

/// One holding as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub stock_no: StockNo,
    pub shares: u32,
    pub buy_price: Decimal,
    pub current_price: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
}

/// Snapshot of the ranked view and totals, ready to print or serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub totals: Totals,
}

impl Report {
    pub fn new(portfolio: &Portfolio) -> Self {
        let rows = portfolio
            .ranked_view()
            .into_iter()
            .map(|p| ReportRow {
                stock_no: p.stock_no(),
                shares: p.shares(),
                buy_price: p.buy_price(),
                current_price: p.current_price(),
                current_value: p.current_value(),
                profit_loss: p.profit_loss(),
            })
            .collect();
        Self {
            rows,
            totals: portfolio.totals(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        if self.is_empty() {
            return "Your portfolio is empty. Time to buy some stocks!\n".to_string();
        }

        let rule = "-".repeat(RULE_WIDTH);
        let mut out = format!("\nMY STOCK PORTFOLIO:\n{rule}\n");
        for row in &self.rows {
            out.push_str(&format!("Stock#{}: {} shares\n", row.stock_no, row.shares));
            out.push_str(&format!("~ Buy Price: {}\n", money(row.buy_price)));
            out.push_str(&format!("~ Current Price: {}\n", money(row.current_price)));
            out.push_str(&format!(
                "~ Value: {} {}\n",
                money(row.current_value),
                signed_money(row.profit_loss)
            ));
            out.push_str(&rule);
            out.push('\n');
        }
        out.push_str(&format!("Total Investment: {}\n", money(self.totals.investment)));
        out.push_str(&format!(
            "Current Portfolio Value: {}\n",
            money(self.totals.current_value)
        ));
        out.push_str(&format!(
            "Overall Profit/Loss: {}\n",
            signed_money(self.totals.profit_loss)
        ));
        out
    }
}

/// `$1234.50`, rounded half-to-even to cents.
pub fn money(value: Decimal) -> String {
    format!("${:.2}", value.round_dp(2))
}

/// `+$100.00` for gains and break-even, `-$50.00` for losses.
pub fn signed_money(value: Decimal) -> String {
    let sign = if value >= Decimal::ZERO { '+' } else { '-' };
    format!("{sign}${:.2}", value.abs().round_dp(2))
}
