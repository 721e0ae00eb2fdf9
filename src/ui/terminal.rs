// src/ui/terminal.rs
use crate::domain::errors::AppResult;
use crate::domain::models::ProfitTone;
use crate::ui::form::{parse_form_date, parse_quantity, TradeForm};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{FuzzySelect, Input, Select};

pub const TITLE: &str = "Stock Trade Profit Calculator";

const ACTIONS: [&str; 5] = [
    "Select stock",
    "Quantity",
    "Purchase date",
    "Sell date",
    "Quit",
];

/// Drives a `TradeForm` from the terminal until the user quits
pub struct TerminalForm<'a> {
    form: TradeForm<'a>,
    theme: ColorfulTheme,
}

impl<'a> TerminalForm<'a> {
    pub fn new(form: TradeForm<'a>) -> Self {
        Self {
            form,
            theme: ColorfulTheme::default(),
        }
    }

    pub fn run(&mut self) -> AppResult<()> {
        println!("{}", TITLE.bold());

        loop {
            self.render();

            let action = Select::with_theme(&self.theme)
                .with_prompt("Change")
                .items(&ACTIONS[..])
                .default(0)
                .interact()?;

            match action {
                0 => self.pick_stock()?,
                1 => self.enter_quantity()?,
                2 => {
                    let current = self.form.selection().purchase_date;
                    if let Some(date) = self.enter_date("Purchase Date", current)? {
                        self.form.set_purchase_date(date);
                    }
                }
                3 => {
                    let current = self.form.selection().sell_date;
                    if let Some(date) = self.enter_date("Sell Date", current)? {
                        self.form.set_sell_date(date);
                    }
                }
                _ => break,
            }
        }

        Ok(())
    }

    fn render(&self) {
        let selection = self.form.selection();
        let view = self.form.view();

        println!();
        println!("{:<16}{}", "Select Stock", selection.symbol);
        println!("{:<16}{}", "Quantity", selection.quantity);
        println!("{:<16}{}", "Purchase Date", selection.purchase_date);
        println!("{:<16}{}", "Sell Date", selection.sell_date);

        if let Some(message) = &view.message {
            println!("{}", message.red());
        }

        println!("{}", view.purchase_label());
        println!("{}", view.sell_label());

        let profit = view.profit_label();
        match view.tone {
            ProfitTone::Positive => println!("{}", profit.green()),
            ProfitTone::Negative => println!("{}", profit.red()),
            ProfitTone::Neutral => println!("{}", profit),
        }
        println!();
    }

    fn pick_stock(&mut self) -> AppResult<()> {
        let symbols = self.form.table().symbols().to_vec();
        if symbols.is_empty() {
            log::warn!("No stocks available to select");
            return Ok(());
        }

        let current = symbols
            .iter()
            .position(|s| s == &self.form.selection().symbol)
            .unwrap_or(0);

        let index = FuzzySelect::with_theme(&self.theme)
            .with_prompt("Select Stock")
            .items(&symbols[..])
            .default(current)
            .interact()?;

        self.form.select_stock(&symbols[index]);
        Ok(())
    }

    fn enter_quantity(&mut self) -> AppResult<()> {
        let max_quantity = self.form.max_quantity();

        let raw = Input::<String>::with_theme(&self.theme)
            .with_prompt("Quantity")
            .with_initial_text(self.form.selection().quantity.to_string())
            .validate_with(move |input: &String| -> Result<(), String> {
                parse_quantity(input, max_quantity).map(|_| ())
            })
            .interact_text()?;

        // already validated by the prompt
        if let Ok(quantity) = parse_quantity(&raw, max_quantity) {
            self.form.set_quantity(quantity);
        }
        Ok(())
    }

    fn enter_date(
        &self,
        prompt: &str,
        current: chrono::NaiveDate,
    ) -> AppResult<Option<chrono::NaiveDate>> {
        let raw = Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("{} (YYYY-MM-DD)", prompt))
            .with_initial_text(current.format("%Y-%m-%d").to_string())
            .validate_with(|input: &String| -> Result<(), &'static str> {
                match parse_form_date(input) {
                    Some(_) => Ok(()),
                    None => Err("Use YYYY-MM-DD, DD-MM-YYYY or MM/DD/YYYY"),
                }
            })
            .interact_text()?;

        Ok(parse_form_date(&raw))
    }
}
