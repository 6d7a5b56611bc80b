//! Interactive form entry using rustyline
//!
//! Walks the field catalogue section by section and re-asks a field until
//! its entry is valid. Ctrl-C or Ctrl-D abandons the form.

use super::{parse_age, parse_measurement, FieldKind, FormInput, Section, FIELDS};
use crate::types::{InsuranceChoice, ModelKind, PredictionRequest};
use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// A completed form: model choice plus measurements
pub type Submission = (ModelKind, PredictionRequest);

/// Reads one form submission at a time from the terminal
pub struct FormPrompter {
    editor: DefaultEditor,
}

impl FormPrompter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    /// Fill the whole form; `None` when the user abandons it
    pub fn fill(&mut self, default_model: ModelKind) -> Result<Option<Submission>> {
        let model_prompt = format!("Select a model [xgboost/random_forest] ({}): ", default_model);
        let model = match self.ask(&model_prompt, |raw| parse_model_choice(raw, default_model))? {
            Some(model) => model,
            None => return Ok(None),
        };

        let mut input = FormInput {
            prg: 0.0,
            pl: 0.0,
            pr: 0.0,
            sk: 0.0,
            ts: 0.0,
            m11: 0.0,
            bd2: 0.0,
            age: 0,
            insurance: InsuranceChoice::No,
        };

        let mut section: Option<Section> = None;
        for field in FIELDS.iter() {
            if section != Some(field.section) {
                println!("\n{}", field.section.title().bold());
                section = Some(field.section);
            }

            let prompt = format!("  {}: ", field.label);
            let filled = match field.kind {
                FieldKind::Age => self.ask(&prompt, parse_age)?.map(|age| input.age = age),
                FieldKind::Insurance => self
                    .ask(&prompt, |raw| raw.parse::<InsuranceChoice>())?
                    .map(|choice| input.insurance = choice),
                FieldKind::Measurement => {
                    let key = field.key;
                    match self.ask(&prompt, |raw| parse_measurement(key, raw))? {
                        Some(value) => {
                            if let Some(slot) = measurement_slot(&mut input, key) {
                                *slot = value;
                            }
                            Some(())
                        }
                        None => None,
                    }
                }
            };

            if filled.is_none() {
                return Ok(None);
            }
        }

        Ok(Some((model, input.validate()?)))
    }

    /// Prompt until `parse` accepts the entry
    fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> crate::Result<T>,
    ) -> Result<Option<T>> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => match parse(&line) {
                    Ok(value) => {
                        let _ = self.editor.add_history_entry(line.trim());
                        return Ok(Some(value));
                    }
                    Err(e) => eprintln!("    {}", e.to_string().red()),
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(anyhow::anyhow!("Readline error: {}", err)),
            }
        }
    }
}

/// Empty entry keeps the default model
pub fn parse_model_choice(raw: &str, default: ModelKind) -> crate::Result<ModelKind> {
    if raw.trim().is_empty() {
        Ok(default)
    } else {
        raw.parse()
    }
}

fn measurement_slot<'a>(input: &'a mut FormInput, key: &str) -> Option<&'a mut f64> {
    match key {
        "PRG" => Some(&mut input.prg),
        "PL" => Some(&mut input.pl),
        "PR" => Some(&mut input.pr),
        "SK" => Some(&mut input.sk),
        "TS" => Some(&mut input.ts),
        "M11" => Some(&mut input.m11),
        "BD2" => Some(&mut input.bd2),
        _ => None,
    }
}
