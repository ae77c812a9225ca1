use crate::domain::recipe::Recipe;

/// The script builder rejected the recipe. Terminal for the request:
/// callers surface this as a data-quality error and never retry.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("recipe has no name")]
    MissingName,
    #[error("recipe has no ingredients")]
    MissingIngredients,
    #[error("recipe has no instructions")]
    MissingInstructions,
}

/// Build the spoken narration script for a recipe.
///
/// Pure and deterministic: identical recipe content always produces
/// byte-identical output. Sections appear in a fixed order; the optional
/// sections are omitted entirely when their field is empty.
pub fn build_script(recipe: &Recipe) -> Result<String, ScriptError> {
    if recipe.name.trim().is_empty() {
        return Err(ScriptError::MissingName);
    }
    if recipe.ingredients.is_empty() {
        return Err(ScriptError::MissingIngredients);
    }
    if recipe.instructions.is_empty() {
        return Err(ScriptError::MissingInstructions);
    }

    let mut script = String::new();
    script.push_str(recipe.name.trim());
    script.push_str(".\n");

    script.push_str("Ingredients:\n");
    for ingredient in &recipe.ingredients {
        script.push_str(&format!(
            "{} of {}.\n",
            ingredient.quantity.trim(),
            ingredient.name.trim()
        ));
    }

    script.push_str("Instructions:\n");
    for (index, instruction) in recipe.instructions.iter().enumerate() {
        script.push_str(&format!("Step {}: {}\n", index + 1, instruction.trim()));
    }

    let extra = &recipe.additional_information;
    push_section(&mut script, "Tips", extra.tips.as_deref());
    push_section(&mut script, "Variations", extra.variations.as_deref());
    push_section(
        &mut script,
        "Serving suggestions",
        extra.serving_suggestions.as_deref(),
    );
    push_section(
        &mut script,
        "Nutritional information",
        extra.nutritional_information.as_deref(),
    );

    Ok(script)
}

fn push_section(script: &mut String, title: &str, content: Option<&str>) {
    if let Some(content) = content {
        if !content.trim().is_empty() {
            script.push_str(&format!("{}: {}\n", title, content.trim()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::{AdditionalInformation, Ingredient};
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn recipe() -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            name: "Tomato Soup".to_string(),
            ingredients: vec![
                Ingredient {
                    name: "tomatoes".to_string(),
                    quantity: "6".to_string(),
                },
                Ingredient {
                    name: "olive oil".to_string(),
                    quantity: "2 tablespoons".to_string(),
                },
            ],
            instructions: vec![
                "Roast the tomatoes.".to_string(),
                "Blend until smooth.".to_string(),
            ],
            additional_information: AdditionalInformation::default(),
            narration_audio_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn it_should_include_name_ingredients_and_numbered_steps_in_order() {
        let script = build_script(&recipe()).unwrap();

        assert_eq!(
            script,
            "Tomato Soup.\n\
             Ingredients:\n\
             6 of tomatoes.\n\
             2 tablespoons of olive oil.\n\
             Instructions:\n\
             Step 1: Roast the tomatoes.\n\
             Step 2: Blend until smooth.\n"
        );
    }

    #[test]
    fn it_should_be_deterministic_for_identical_input() {
        let recipe = recipe();
        assert_eq!(build_script(&recipe).unwrap(), build_script(&recipe).unwrap());
    }

    #[test]
    fn it_should_append_optional_sections_in_fixed_order() {
        let mut recipe = recipe();
        recipe.additional_information = AdditionalInformation {
            tips: Some("Use ripe tomatoes".to_string()),
            variations: Some("Add basil".to_string()),
            serving_suggestions: Some("Serve with bread".to_string()),
            nutritional_information: Some("120 kcal per serving".to_string()),
        };

        let script = build_script(&recipe).unwrap();
        let tips = script.find("Tips: Use ripe tomatoes").unwrap();
        let variations = script.find("Variations: Add basil").unwrap();
        let serving = script.find("Serving suggestions: Serve with bread").unwrap();
        let nutrition = script
            .find("Nutritional information: 120 kcal per serving")
            .unwrap();

        assert!(tips < variations);
        assert!(variations < serving);
        assert!(serving < nutrition);
    }

    #[test]
    fn it_should_omit_empty_optional_sections() {
        let mut recipe = recipe();
        recipe.additional_information = AdditionalInformation {
            tips: Some("   ".to_string()),
            variations: None,
            serving_suggestions: Some("Serve hot".to_string()),
            nutritional_information: None,
        };

        let script = build_script(&recipe).unwrap();
        assert!(!script.contains("Tips"));
        assert!(!script.contains("Variations"));
        assert!(script.contains("Serving suggestions: Serve hot"));
        assert!(!script.contains("Nutritional information"));
    }

    #[test]
    fn it_should_reject_missing_required_fields() {
        let mut no_name = recipe();
        no_name.name = "  ".to_string();
        assert!(matches!(build_script(&no_name), Err(ScriptError::MissingName)));

        let mut no_ingredients = recipe();
        no_ingredients.ingredients.clear();
        assert!(matches!(
            build_script(&no_ingredients),
            Err(ScriptError::MissingIngredients)
        ));

        let mut no_instructions = recipe();
        no_instructions.instructions.clear();
        assert!(matches!(
            build_script(&no_instructions),
            Err(ScriptError::MissingInstructions)
        ));
    }
}
