
use nonempty::NonEmpty;

use crate::utility::traits::ToList;


#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandType {
    Casual,
    Allowlist,
    Moderation,
    Suggestions,
    Announcements,
}

enum ParameterType {
    Constant,
    Required,
    Optional,
}

struct Parameter {
    name: String,
    param_type: ParameterType,
}

type Usage = Vec<Parameter>;

pub struct UsageBuilder {
    pub command_type: CommandType,
    pub triggers: NonEmpty<String>,
    usage: Vec<Usage>,
    example: Option<String>,
}

impl UsageBuilder {

    pub fn new(command_type: CommandType, triggers: NonEmpty<String>) -> UsageBuilder {
        UsageBuilder {
            command_type,
            triggers,
            usage: Vec::new(),
            example: None,
        }
    }

    pub fn new_usage(mut self) -> Self {
        self.usage.push(Vec::new());
        self
    }

    fn add_parameter(&mut self, parameter: Parameter) {
        if self.usage.is_empty() {
            self.usage.push(Vec::new());
        }
        self.usage.last_mut().unwrap().push(parameter);
    }

    pub fn add_constant<'a>(mut self, parameter: impl ToList<&'a str>) -> Self {
        for name in parameter.to_list() {
            self.add_parameter(Parameter {
                name: name.to_string(),
                param_type: ParameterType::Constant,
            });
        }
        self
    }

    pub fn add_required<'a>(mut self, parameter: impl ToList<&'a str>) -> Self {
        for name in parameter.to_list() {
            self.add_parameter(Parameter {
                name: name.to_string(),
                param_type: ParameterType::Required,
            });
        }
        self
    }

    pub fn add_optional<'a>(mut self, parameter: impl ToList<&'a str>) -> Self {
        for name in parameter.to_list() {
            self.add_parameter(Parameter {
                name: name.to_string(),
                param_type: ParameterType::Optional,
            });
        }
        self
    }

    pub fn example(mut self, example: &str) -> Self {
        self.example = Some(example.to_string());
        self
    }

    fn build_usage(&self, usage: &Usage, prefix: &str) -> String {
        let mut usage_string = format!("{}{}", prefix, self.triggers.head);
        for parameter in usage.iter() {
            match parameter.param_type {
                ParameterType::Constant => usage_string.push_str(&format!(" {}", parameter.name)),
                ParameterType::Required => usage_string.push_str(&format!(" <{}>", parameter.name)),
                ParameterType::Optional => usage_string.push_str(&format!(" [{}]", parameter.name)),
            }
        }
        usage_string
    }

    pub fn build(&self, prefix: &str) -> String {

        let mut usage_string: String = match self.usage.is_empty() {
            true  => format!("{}{}", prefix, self.triggers.head),
            false => self.usage
                .iter()
                .map(|usage| self.build_usage(usage, prefix))
                .collect::<Vec<String>>()
                .join("\n"),
        };

        if !self.triggers.tail.is_empty() {
            usage_string.push_str(&format!("\nAlternative names: {:?}", self.triggers.tail));
        }

        if let Some(example) = &self.example {
            usage_string.push_str(&format!("\nExample: {}{}", prefix, example));
        }

        usage_string
    }

}
