use std::collections::BTreeMap;

use super::*;

const LINENOS: &str = "linenos";

/// Line numbering for highlighted code blocks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LineNumbers {
    #[default]
    Off,
    Table,
    Inline,
}

/// Options forwarded to the code highlighter, keyed by option name.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct CodeBlockOptions {
    options: BTreeMap<String, OptionValue>,
}

impl CodeBlockOptions {
    pub(crate) fn from_raw(options: BTreeMap<String, OptionValue>) -> Result<Self> {
        let options = Self { options };
        options.parse_line_numbers()?;
        Ok(options)
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> + '_ {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn line_numbers(&self) -> LineNumbers {
        self.parse_line_numbers().unwrap_or_default()
    }

    fn parse_line_numbers(&self) -> Result<LineNumbers> {
        match self.options.get(LINENOS) {
            None | Some(OptionValue::Bool(false)) => Ok(LineNumbers::Off),
            Some(OptionValue::Bool(true)) => Ok(LineNumbers::Table),
            Some(OptionValue::String(s)) if s == "table" => Ok(LineNumbers::Table),
            Some(OptionValue::String(s)) if s == "inline" => Ok(LineNumbers::Inline),
            Some(other) => Err(Error::invalid(
                format!("code_block_options.{LINENOS}"),
                format!("expected `table`, `inline` or a boolean, got `{other}`"),
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn options(yaml: &str) -> Result<CodeBlockOptions> {
        CodeBlockOptions::from_raw(serde_yaml::from_str(yaml).unwrap())
    }

    #[test]
    fn linenos_table() {
        let actual = options("linenos: table\n").unwrap();
        assert_eq!(actual.line_numbers(), LineNumbers::Table);
    }

    #[test]
    fn linenos_bool() {
        assert_eq!(options("linenos: true\n").unwrap().line_numbers(), LineNumbers::Table);
        assert_eq!(options("linenos: false\n").unwrap().line_numbers(), LineNumbers::Off);
    }

    #[test]
    fn linenos_absent() {
        let actual = options("hl_lines: '3 4'\n").unwrap();
        assert_eq!(actual.line_numbers(), LineNumbers::Off);
        assert_eq!(actual.get("hl_lines").and_then(|v| v.as_str()), Some("3 4"));
    }

    #[test]
    fn linenos_unknown_mode() {
        let err = options("linenos: gutter\n").unwrap_err();
        assert_eq!(err.field(), Some("code_block_options.linenos"));
    }
}
