use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use label_draft::config::DEFAULT_LEAD_INBOX;
use label_draft::{
    review_mailto_link, LabelDraft, NutrientField, Project, TargetMarket, Wizard, WizardError,
    WizardStep,
};

const USAGE: &str = "\
label-draft - draft an EU/US nutrition and ingredient label

USAGE:
    label-draft                 Run the interactive four-step wizard
    label-draft wizard          Same as above
    label-draft draft <FILE>    Draft a label from a JSON project file
    label-draft --help          Show this message

PROJECT FILE:
    { \"settings\": { \"email\", \"productName\", \"targetMarket\", \"targetLanguage\" },
      \"ingredients\": [ { \"name\", \"percent\" } ],
      \"nutrition\": { \"kcal\", \"sodium\", \"fat\", \"saturates\", \"carbs\", \"sugars\", \"protein\", \"fibre\" } }
";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "label_draft=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        None | Some("wizard") => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_wizard(&mut stdin.lock(), &mut stdout.lock())?;
        }
        Some("draft") => {
            let Some(path) = args.get(2) else {
                bail!("missing project file\n\n{}", USAGE);
            };
            run_draft(Path::new(path))?;
        }
        Some("-h") | Some("--help") | Some("help") => print!("{}", USAGE),
        Some(other) => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }

    Ok(())
}

// ============================================================================
// BATCH MODE
// ============================================================================

fn run_draft(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read project file: {:?}", path))?;
    let project: Project =
        serde_json::from_str(&content).context("Failed to parse project JSON")?;

    if let Err(errors) = project.settings.validate() {
        for e in &errors {
            eprintln!("⚠️  {}: {}", e.field(), e);
        }
    }
    if project.ingredients.is_empty() {
        eprintln!("⚠️  no ingredients in project file");
    }

    let draft = project.draft();
    let stdout = io::stdout();
    print_draft(&mut stdout.lock(), &draft)?;
    Ok(())
}

fn print_draft<W: Write>(out: &mut W, draft: &LabelDraft) -> io::Result<()> {
    writeln!(out, "{}", draft.label_text)?;
    writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
    writeln!(out, "Compliance score: {}%", draft.compliance_score)?;
    for item in &draft.checklist {
        let mark = if item.satisfied { "✓" } else { "✗" };
        writeln!(out, "  {} {}", mark, item.description)?;
    }
    if draft.total_percent > 100.0 {
        writeln!(
            out,
            "⚠️  ingredient percentages add up to {:.1}% (over 100%)",
            draft.total_percent
        )?;
    }
    writeln!(out, "This is a draft for reference only; have it reviewed before use.")?;
    Ok(())
}

// ============================================================================
// INTERACTIVE WIZARD
// ============================================================================

/// Prompt and read one trimmed line; `None` on end of input
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn header<W: Write>(out: &mut W, step: WizardStep) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "[{}/{}] {}",
        step.number(),
        WizardStep::ALL.len(),
        step.title()
    )?;
    Ok(())
}

fn report_advance<W: Write>(out: &mut W, result: Result<WizardStep, WizardError>) -> io::Result<()> {
    if let Err(WizardError::Blocked { errors, .. }) = result {
        for e in errors {
            writeln!(out, "  ⚠️  {}", e)?;
        }
    }
    Ok(())
}

/// Drive a full wizard session over the given input and output
fn run_wizard<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<()> {
    let mut wizard = Wizard::new();

    loop {
        let step = wizard.step();
        header(out, step)?;

        let keep_going = match step {
            WizardStep::Settings => settings_step(&mut wizard, input, out)?,
            WizardStep::Ingredients => ingredients_step(&mut wizard, input, out)?,
            WizardStep::Nutrition => nutrition_step(&mut wizard, input, out)?,
            WizardStep::Output => output_step(&mut wizard, input, out)?,
        };
        if !keep_going {
            return Ok(());
        }
    }
}

fn settings_step<R: BufRead, W: Write>(wizard: &mut Wizard, input: &mut R, out: &mut W) -> Result<bool> {
    let current = wizard.settings().clone();

    let Some(email) = ask(input, out, &format!("Email [{}]: ", current.email))? else {
        return Ok(false);
    };
    let Some(product) = ask(input, out, &format!("Product name [{}]: ", current.product_name))? else {
        return Ok(false);
    };
    writeln!(
        out,
        "Markets: {}, {}",
        TargetMarket::EU.description(),
        TargetMarket::US.description()
    )?;
    let Some(market) = ask(input, out, &format!("Target market EU/US [{}]: ", current.target_market))? else {
        return Ok(false);
    };
    let Some(language) = ask(input, out, &format!("Sales language [{}]: ", current.target_language))? else {
        return Ok(false);
    };

    let settings = wizard.settings_mut();
    if !email.is_empty() {
        settings.email = email;
    }
    if !product.is_empty() {
        settings.product_name = product;
    }
    if !market.is_empty() {
        match market.parse::<TargetMarket>() {
            Ok(m) => settings.target_market = m,
            Err(e) => writeln!(out, "  ⚠️  {}", e)?,
        }
    }
    if !language.is_empty() {
        settings.target_language = language;
    }

    report_advance(out, wizard.advance())?;
    Ok(true)
}

fn ingredients_step<R: BufRead, W: Write>(wizard: &mut Wizard, input: &mut R, out: &mut W) -> Result<bool> {
    writeln!(out, "Ingredients are sorted by weight automatically; allergens are detected.")?;
    writeln!(out, "Enter a name, '-N' to remove entry N, 'back', or an empty line to continue.")?;

    loop {
        for (i, ingredient) in wizard.ingredients().iter().enumerate() {
            let flag = label_draft::detect(&ingredient.name)
                .map(|tag| format!("  ⚠️ {}", tag))
                .unwrap_or_default();
            writeln!(out, "  {}. {} {}%{}", i + 1, ingredient.name, ingredient.percent, flag)?;
        }
        if wizard.ingredients().exceeds_hundred() {
            writeln!(out, "  ⚠️  total {:.1}% is over 100%", wizard.ingredients().total_percent())?;
        }

        let Some(name) = ask(input, out, "Ingredient: ")? else {
            return Ok(false);
        };

        if name.is_empty() {
            report_advance(out, wizard.advance())?;
            return Ok(true);
        }
        if name == "back" {
            wizard.back();
            return Ok(true);
        }
        if let Some(position) = name.strip_prefix('-').and_then(|n| n.parse::<usize>().ok()) {
            // entries are numbered from 1 on screen
            let removed = position
                .checked_sub(1)
                .map(|index| wizard.remove_ingredient(index));
            if !matches!(removed, Some(Ok(_))) {
                writeln!(out, "  ⚠️  no ingredient at position {}", position)?;
            }
            continue;
        }

        let Some(percent) = ask(input, out, "Percent: ")? else {
            return Ok(false);
        };
        if let Err(e) = wizard.add_ingredient(&name, &percent) {
            writeln!(out, "  ⚠️  {}", e)?;
        }
    }
}

fn nutrition_step<R: BufRead, W: Write>(wizard: &mut Wizard, input: &mut R, out: &mut W) -> Result<bool> {
    writeln!(out, "Values per 100g. Type 'back' to return to ingredients.")?;

    for field in NutrientField::ENTRY_ORDER {
        let current = wizard.nutrition().get(field);
        let prompt = format!(
            "{} ({}) [{}, e.g. {}]: ",
            field.label(),
            field.unit(),
            current,
            field.placeholder()
        );
        let Some(raw) = ask(input, out, &prompt)? else {
            return Ok(false);
        };
        if raw == "back" {
            wizard.back();
            return Ok(true);
        }
        if !raw.is_empty() {
            wizard.set_nutrient(field, &raw);
        }
    }

    if wizard.settings().target_market == TargetMarket::EU {
        let facts = wizard.nutrition();
        writeln!(
            out,
            "  EU conversion: {} kJ, salt {:.2} g",
            label_draft::kcal_to_kj(facts.kcal),
            label_draft::round_half_up(label_draft::sodium_to_salt(facts.sodium), 2)
        )?;
    }

    report_advance(out, wizard.advance())?;
    Ok(true)
}

fn output_step<R: BufRead, W: Write>(wizard: &mut Wizard, input: &mut R, out: &mut W) -> Result<bool> {
    let Some(draft) = wizard.draft() else {
        return Ok(true);
    };
    print_draft(out, &draft)?;
    writeln!(out)?;
    writeln!(
        out,
        "Expert review: {}",
        review_mailto_link(
            DEFAULT_LEAD_INBOX,
            wizard.settings(),
            &draft.label_text,
            draft.compliance_score
        )
    )?;

    loop {
        let Some(choice) = ask(input, out, "[b]ack, [r]estart, [q]uit: ")? else {
            return Ok(false);
        };
        match choice.as_str() {
            "b" | "back" => {
                wizard.back();
                return Ok(true);
            }
            "r" | "restart" => {
                wizard.reset();
                return Ok(true);
            }
            "q" | "quit" | "" => return Ok(false),
            _ => continue,
        }
    }
}
