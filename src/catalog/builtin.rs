//! Built-in TeleUSSD menu tree

use super::Catalog;
use crate::screen::{InputKind, MenuOption, Screen};

const THANK_YOU: &str = "Thank you for using our service";

fn back() -> MenuOption {
    MenuOption::new("back", "Go Back")
}

pub fn teleussd() -> Catalog {
    let entries = vec![
        (
            "start",
            Screen::menu(
                "Welcome to TeleUSSD\n\nPlease select a service:",
                vec![
                    MenuOption::new("banking", "Banking Services"),
                    MenuOption::new("airtime", "Buy Airtime"),
                    MenuOption::new("bills", "Pay Bills"),
                    MenuOption::new("account", "My Account"),
                ],
            ),
        ),
        // Banking
        (
            "banking",
            Screen::menu(
                "Banking Services",
                vec![
                    MenuOption::new("balance", "Check Balance"),
                    MenuOption::new("transfer", "Transfer Money"),
                    MenuOption::new("statement", "Mini Statement"),
                    back(),
                ],
            ),
        ),
        (
            "banking.balance",
            Screen::input("Enter your PIN to check balance:", InputKind::Pin)
                .with_footer("Your PIN will not be shared with anyone"),
        ),
        (
            "banking.balance.submitted",
            Screen::message(
                "Your current balance is:\n\n$2,450.75\n\nAvailable: $2,430.75\nHold: $20.00",
            )
            .with_footer("Last updated on Apr 19, 2025"),
        ),
        (
            "banking.transfer",
            Screen::menu(
                "Transfer Money To:",
                vec![
                    MenuOption::new("mobile", "Mobile Money"),
                    MenuOption::new("bank", "Bank Account"),
                    MenuOption::new("saved", "Saved Beneficiary"),
                    back(),
                ],
            ),
        ),
        (
            "banking.transfer.mobile",
            Screen::input("Enter recipient's mobile number:", InputKind::Phone),
        ),
        (
            "banking.transfer.mobile.submitted",
            Screen::input("Enter amount to send (USD):", InputKind::Number),
        ),
        (
            "banking.transfer.mobile.submitted.submitted",
            Screen::input(
                "Enter your PIN to authorize transfer of $50 to +254712345678:",
                InputKind::Pin,
            ),
        ),
        (
            "banking.transfer.mobile.submitted.submitted.submitted",
            Screen::end(
                "Transfer of $50 to +254712345678 was successful!\n\nTransaction ID: TRX123456\nNew Balance: $2,400.75",
            )
            .with_footer(THANK_YOU),
        ),
        // Airtime
        (
            "airtime",
            Screen::menu(
                "Buy Airtime",
                vec![
                    MenuOption::new("self", "For Myself"),
                    MenuOption::new("other", "For Someone Else"),
                    MenuOption::new("bundle", "Buy Data Bundle"),
                    back(),
                ],
            ),
        ),
        (
            "airtime.self",
            Screen::menu(
                "Select Amount:",
                vec![
                    MenuOption::new("5", "$5"),
                    MenuOption::new("10", "$10"),
                    MenuOption::new("20", "$20"),
                    MenuOption::new("custom", "Custom Amount"),
                ],
            ),
        ),
        (
            "airtime.self.5",
            Screen::input(
                "Confirm purchase of $5 airtime for your number +254712345678?\n\n1. Confirm\n2. Cancel",
                InputKind::Number,
            ),
        ),
        (
            "airtime.self.5.submitted",
            Screen::end(
                "Airtime purchase successful!\n\n$5 airtime has been added to +254712345678.\n\nTransaction ID: AIR789012\nNew Balance: $2,445.75",
            )
            .with_footer(THANK_YOU),
        ),
        // Bills
        (
            "bills",
            Screen::menu(
                "Pay Bills",
                vec![
                    MenuOption::new("electricity", "Electricity"),
                    MenuOption::new("water", "Water"),
                    MenuOption::new("internet", "Internet"),
                    back(),
                ],
            ),
        ),
        // Account
        (
            "account",
            Screen::menu(
                "My Account",
                vec![
                    MenuOption::new("profile", "View Profile"),
                    MenuOption::new("settings", "Settings"),
                    MenuOption::new("support", "Customer Support"),
                    back(),
                ],
            ),
        ),
    ];

    entries
        .into_iter()
        .map(|(key, screen)| (key.to_string(), screen))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{validate, Severity};
    use crate::screen::ScreenKind;

    #[test]
    fn test_builtin_has_root_menu() {
        let catalog = teleussd();
        let start = catalog.lookup("start").unwrap();
        assert_eq!(start.kind, ScreenKind::Menu);
        assert!(start.message.starts_with("Welcome to TeleUSSD"));
        assert_eq!(start.options.len(), 4);
    }

    #[test]
    fn test_builtin_has_no_validation_errors() {
        let issues = validate(&teleussd());
        assert!(
            issues.iter().all(|i| i.severity != Severity::Error),
            "unexpected errors: {:?}",
            issues
        );
    }

    #[test]
    fn test_transfer_flow_is_chained() {
        let catalog = teleussd();
        let mut key = String::from("banking.transfer.mobile");
        let mut steps = 0;
        while catalog.lookup(&key).map(|s| s.kind) == Some(ScreenKind::Input) {
            key.push_str(".submitted");
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert_eq!(catalog.lookup(&key).map(|s| s.kind), Some(ScreenKind::End));
    }
}
