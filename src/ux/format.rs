use banque_api::{account::BankAccount, transaction::Transaction, user::User};

/// French formatting of euros: `-1 250,50 €`
pub fn money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, c) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{},{:02} €", sign, grouped, cents % 100)
}

pub fn account_line(account: &BankAccount) -> String {
    let id = account.id.as_ref().map_or("-", |id| id.as_str());
    format!(
        "{:<4} {:<16} {:>14}  {}",
        id,
        account.account_name,
        money(account.balance),
        account.account_number
    )
}

pub fn transaction_line(transaction: &Transaction) -> String {
    format!(
        "{:<38} {:<10} {:<28} {:>14}  {}",
        transaction.id,
        transaction.date,
        transaction.title,
        money(transaction.signed_amount()),
        transaction.category.name
    )
}

pub fn profile_lines(user: &User) -> Vec<String> {
    let mut lines = vec![
        format!("Name:  {}", user.name),
        format!("Email: {}", user.email),
        format!("Phone: {}", user.phone),
    ];
    let grouped = user.grouped_accounts();
    if let Some(current) = grouped.current_account {
        lines.push(format!("IBAN:  {}", current.account_number));
    }
    let savings = [grouped.livret_a, grouped.livret_jeune, grouped.pel]
        .into_iter()
        .flatten()
        .map(|a| format!("{} ({})", a.account_name, money(a.balance)))
        .collect::<Vec<_>>();
    if !savings.is_empty() {
        lines.push(format!("Savings: {}", savings.join(", ")));
    }
    lines
}
