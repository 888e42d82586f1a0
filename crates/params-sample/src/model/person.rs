use plain_params::{plain_params, Declaration, ParamsError};

plain_params! {
    /// A person's name and age, both required.
    ///
    /// Presence is declared a second time on purpose: real fields already
    /// carry a presence rule, and the schema keeps only one.
    pub struct PersonParams {
        real: [name, age],
        validations: person_validations,
    }
}

fn person_validations(declaration: Declaration) -> Result<Declaration, ParamsError> {
    Ok(declaration.validates_presence_of(["name", "age"]))
}
