use std::cmp::Reverse;
use steam::{EnrichedItem, Report};

const NO_PRICE: &str = "-";

/// Plain text table of a tracking run. With a holder, owned items come first
/// and a total inventory value line is printed above the table.
pub(crate) fn report(report: &Report) -> String {
    let mut items: Vec<&EnrichedItem> = report.items.iter().collect();
    if report.holder.is_some() {
        items.sort_by_key(|item| {
            (
                Reverse(item.amount),
                item.highest_buy_order().unwrap_or(-1),
            )
        });
    }

    let width = items
        .iter()
        .map(|item| item.entry.name.chars().count())
        .max()
        .unwrap_or_default()
        .max("Item".len());

    let mut lines = Vec::with_capacity(items.len() + 2);

    if let Some(holder) = &report.holder {
        lines.push(format!(
            "Total price of inventory of {holder}: {:.2}{}",
            report.total_value(),
            report.currency_suffix
        ));
    }

    let mut header = format!(
        "{:<width$} {:>10} {:>10} {:>10} {:>5} {:>5}",
        "Item", "Buy", "Sell", "Change", "Trend", "Drops"
    );
    if report.holder.is_some() {
        header.push_str(&format!(" {:>6} {:>12}", "Inv", "Total Price"));
    }
    lines.push(header);

    for item in items {
        let mut line = format!(
            "{:<width$} {:>10} {:>10} {:>10} {:>5} {:>5}",
            item.entry.name,
            price(item.highest_buy_order()),
            price(item.order_book.lowest_sell_order),
            format!("{:.2}", item.difference.abs() as f64 / 100.0),
            trend_marker(item.difference),
            if item.drops_in_game { "yes" } else { "no" },
        );
        if report.holder.is_some() {
            line.push_str(&format!(" {:>6} {:>12.2}", item.amount, item.amount_price));
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn price(minor_units: Option<i64>) -> String {
    minor_units.map_or_else(
        || NO_PRICE.to_string(),
        |p| format!("{:.2}", p as f64 / 100.0),
    )
}

fn trend_marker(difference: i64) -> &'static str {
    match difference.signum() {
        1 => "up",
        -1 => "down",
        _ => "",
    }
}
