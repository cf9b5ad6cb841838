//! English titles and messages for the built-in rules and fixes.
//!
//! Templates use `{0}`, `{1}`, ... placeholders filled from a diagnostic's
//! message arguments, or for fixes, from the values the fix provider
//! supplies (see [`crate::rules::FixProvider::title_args`]).

use sharpfix_core::resources::ResourceProvider;

/// The built-in English resource table.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishResources;

impl ResourceProvider for EnglishResources {
    fn rule_title(&self, rule_id: &str) -> Option<&str> {
        Some(match rule_id.to_ascii_uppercase().as_str() {
            "ACA0001" => "Interface implementation can forward to collection children",
            "ACA0002" => "Class contains comments",
            "ACA0003" => "Method contains comments",
            "ACA0004" => "Array initializer contains comments",
            "ACA0005" => "Namespace contains comments",
            "ACA0006" => "Static type can be imported",
            "CS0123" => "No overload matches delegate",
            "CS0161" => "Not all code paths return a value",
            "CS0407" => "Method has the wrong return type",
            "CS1998" => "Async method lacks await operators",
            "CS4016" => "Async method returns a task instead of a value",
            _ => return None,
        })
    }

    fn message_format(&self, rule_id: &str) -> Option<&str> {
        Some(match rule_id.to_ascii_uppercase().as_str() {
            "ACA0001" => "Forward execution of \"{0}\" to member \"{1}\"",
            "ACA0002" => "Comments can be removed from this class.",
            "ACA0003" => "Comments can be removed from this method.",
            "ACA0004" => "Comments can be removed from this array.",
            "ACA0005" => "Comments can be removed from this namespace.",
            "ACA0006" => "Import type \"{0}\" as static.",
            "CS0123" => "No overload for '{0}' matches delegate '{1}'",
            "CS0161" => "'{0}': not all code paths return a value",
            "CS0407" => "'{1} {0}' has the wrong return type",
            "CS1998" => {
                "This async method lacks 'await' operators and will run synchronously."
            }
            "CS4016" => {
                "Since this is an async method, the return expression must be of type '{0}' rather than 'Task<{0}>'"
            }
            _ => return None,
        })
    }

    fn fix_title_format(&self, fix_name: &str) -> Option<&str> {
        Some(match fix_name {
            "FixByForwardingToCollectionChildren" => "Forward execution of \"{0}\" to member \"{1}\"",
            "FixByRemovingClassComments" => "Remove comments from this class",
            "FixByRemovingMethodComments" => "Remove comments from this method",
            "FixByRemovingArrayInitializerComments" => "Remove comments from this array",
            "FixByRemovingNamespaceComments" => "Remove comments from this namespace",
            "FixByImportingTypeAsStatic" => "Import type \"{0}\" as static.",
            "FixByReplacingWithThrowExpression" => {
                "Throw NotImplementedException in branches of \"{0}\" that do not return {1}"
            }
            "FixByRewritingParameters" => "Rewrite parameters of \"{0}\" to match the delegate",
            "FixByChangingReturnTypeOfMethod" => "Change return type of \"{0}\" to {1}",
            "FixByWrappingInTaskResult" => "Remove async and wrap return values in Task.FromResult",
            "FixByUnwrappingTaskFromResult" => "Return values directly instead of Task.FromResult",
            _ => return None,
        })
    }
}
