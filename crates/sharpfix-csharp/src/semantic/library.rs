//! The reference library.
//!
//! Documents are bound against a small slice of the .NET base class library,
//! written as C# declarations without bodies and declared once per process.
//! Every semantic model starts from a clone of this table.

use once_cell::sync::Lazy;
use tracing::error;

use super::declarations;
use super::symbols::{SymbolId, SymbolTable};

const LIBRARY_SOURCE: &str = r#"
using System.Collections.Generic;

namespace System
{
    public class Object
    {
        public virtual string ToString();
        public virtual bool Equals(object obj);
        public virtual int GetHashCode();
    }

    public struct Boolean { }
    public struct Byte { }
    public struct Char { }
    public struct Int16 { }
    public struct Int32 { public static int Parse(string s); }
    public struct Int64 { }
    public struct UInt32 { }
    public struct UInt64 { }
    public struct Single { }
    public struct Double { }
    public struct Decimal { }
    public struct Guid { public static Guid NewGuid(); }
    public struct DateTime { public static DateTime Now { get; } }
    public struct TimeSpan { public static TimeSpan FromSeconds(double value); }

    public sealed class String : IEnumerable<char>
    {
        public static readonly string Empty;
        public int Length { get; }
        public static bool IsNullOrEmpty(string value);
        public static bool IsNullOrWhiteSpace(string value);
        public static string Join(string separator, IEnumerable<string> values);
        public static string Format(string format, object arg0);
        public static string Concat(string str0, string str1);
        public bool Contains(string value);
        public bool StartsWith(string value);
        public string Substring(int startIndex);
        public string Trim();
        public string ToUpper();
        public string ToLower();
        public string[] Split(char separator);
    }

    public abstract class Array
    {
        public int Length { get; }
        public static T[] Empty<T>();
    }

    public abstract class Delegate { }
    public class Type { public string Name { get; } }
    public abstract class Enum { }
    public abstract class ValueType { }
    public struct Nullable<T> { public bool HasValue { get; } public T Value { get; } }

    public class Exception
    {
        public Exception();
        public Exception(string message);
        public Exception(string message, Exception innerException);
        public string Message { get; }
        public Exception InnerException { get; }
    }

    public class SystemException : Exception
    {
        public SystemException();
        public SystemException(string message);
    }

    public class NotImplementedException : SystemException
    {
        public NotImplementedException();
        public NotImplementedException(string message);
    }

    public class NotSupportedException : SystemException
    {
        public NotSupportedException();
        public NotSupportedException(string message);
    }

    public class InvalidOperationException : SystemException
    {
        public InvalidOperationException();
        public InvalidOperationException(string message);
    }

    public class ArgumentException : SystemException
    {
        public ArgumentException();
        public ArgumentException(string message);
    }

    public class ArgumentNullException : ArgumentException
    {
        public ArgumentNullException();
        public ArgumentNullException(string paramName);
    }

    public interface IDisposable
    {
        void Dispose();
    }

    public interface IComparable<in T>
    {
        int CompareTo(T other);
    }

    public interface IEquatable<T>
    {
        bool Equals(T other);
    }

    public static class Math
    {
        public const double PI = 3.14159265358979;
        public const double E = 2.71828182845905;
        public static int Abs(int value);
        public static int Max(int val1, int val2);
        public static int Min(int val1, int val2);
        public static double Pow(double x, double y);
        public static double Sqrt(double d);
        public static double Round(double a);
        public static double Floor(double d);
        public static double Ceiling(double a);
    }

    public static class Console
    {
        public static void WriteLine();
        public static void WriteLine(string value);
        public static void WriteLine(object value);
        public static void Write(string value);
        public static string ReadLine();
    }

    public static class Environment
    {
        public static string NewLine { get; }
        public static void Exit(int exitCode);
    }

    public delegate void Action();
    public delegate void Action<in T>(T obj);
    public delegate void Action<in T1, in T2>(T1 arg1, T2 arg2);
    public delegate TResult Func<out TResult>();
    public delegate TResult Func<in T, out TResult>(T arg);
    public delegate TResult Func<in T1, in T2, out TResult>(T1 arg1, T2 arg2);
    public delegate TResult Func<in T1, in T2, in T3, out TResult>(T1 arg1, T2 arg2, T3 arg3);
    public delegate bool Predicate<in T>(T obj);
    public delegate int Comparison<in T>(T x, T y);
}

namespace System.Collections
{
    public interface IEnumerable { }
}

namespace System.Collections.Generic
{
    public interface IEnumerator<out T> : IDisposable
    {
        T Current { get; }
        bool MoveNext();
    }

    public interface IEnumerable<out T> : System.Collections.IEnumerable
    {
        IEnumerator<T> GetEnumerator();
    }

    public interface IReadOnlyCollection<out T> : IEnumerable<T>
    {
        int Count { get; }
    }

    public interface IReadOnlyList<out T> : IReadOnlyCollection<T> { }

    public interface ICollection<T> : IEnumerable<T>
    {
        int Count { get; }
        void Add(T item);
        bool Remove(T item);
        void Clear();
        bool Contains(T item);
    }

    public interface IList<T> : ICollection<T>
    {
        int IndexOf(T item);
        void Insert(int index, T item);
        void RemoveAt(int index);
    }

    public interface ISet<T> : ICollection<T> { }

    public interface IDictionary<TKey, TValue> : ICollection<KeyValuePair<TKey, TValue>>
    {
        bool ContainsKey(TKey key);
        bool TryGetValue(TKey key, out TValue value);
    }

    public struct KeyValuePair<TKey, TValue>
    {
        public TKey Key { get; }
        public TValue Value { get; }
    }

    public class List<T> : IList<T>, IReadOnlyList<T>
    {
        public List();
        public List(int capacity);
        public List(IEnumerable<T> collection);
        public int Count { get; }
        public void Add(T item);
        public void AddRange(IEnumerable<T> collection);
        public bool Remove(T item);
        public void Clear();
        public bool Contains(T item);
        public int IndexOf(T item);
        public void Insert(int index, T item);
        public void RemoveAt(int index);
        public void Sort();
        public T[] ToArray();
        public void ForEach(Action<T> action);
    }

    public class HashSet<T> : ISet<T>, IReadOnlyCollection<T>
    {
        public HashSet();
        public HashSet(IEnumerable<T> collection);
        public int Count { get; }
        public void Add(T item);
        public bool Remove(T item);
        public void Clear();
        public bool Contains(T item);
    }

    public class Dictionary<TKey, TValue> : IDictionary<TKey, TValue>
    {
        public Dictionary();
        public int Count { get; }
        public ICollection<TKey> Keys { get; }
        public ICollection<TValue> Values { get; }
        public void Add(TKey key, TValue value);
        public bool Remove(TKey key);
        public void Clear();
        public bool ContainsKey(TKey key);
        public bool TryGetValue(TKey key, out TValue value);
    }

    public class Queue<T> : IEnumerable<T>, IReadOnlyCollection<T>
    {
        public Queue();
        public int Count { get; }
        public void Enqueue(T item);
        public T Dequeue();
    }

    public class Stack<T> : IEnumerable<T>, IReadOnlyCollection<T>
    {
        public Stack();
        public int Count { get; }
        public void Push(T item);
        public T Pop();
    }
}

namespace System.Linq
{
    public static class Enumerable
    {
        public static bool All<TSource>(this IEnumerable<TSource> source, Func<TSource, bool> predicate);
        public static bool Any<TSource>(this IEnumerable<TSource> source);
        public static bool Any<TSource>(this IEnumerable<TSource> source, Func<TSource, bool> predicate);
        public static IEnumerable<TResult> Select<TSource, TResult>(this IEnumerable<TSource> source, Func<TSource, TResult> selector);
        public static IEnumerable<TSource> Where<TSource>(this IEnumerable<TSource> source, Func<TSource, bool> predicate);
        public static TSource First<TSource>(this IEnumerable<TSource> source);
        public static TSource FirstOrDefault<TSource>(this IEnumerable<TSource> source);
        public static int Count<TSource>(this IEnumerable<TSource> source);
        public static TSource[] ToArray<TSource>(this IEnumerable<TSource> source);
        public static List<TSource> ToList<TSource>(this IEnumerable<TSource> source);
        public static IEnumerable<TSource> Concat<TSource>(this IEnumerable<TSource> first, IEnumerable<TSource> second);
        public static IEnumerable<TSource> Distinct<TSource>(this IEnumerable<TSource> source);
        public static IEnumerable<TResult> Empty<TResult>();
    }
}

namespace System.Text
{
    public sealed class StringBuilder
    {
        public StringBuilder();
        public StringBuilder(string value);
        public int Length { get; }
        public StringBuilder Append(string value);
        public StringBuilder AppendLine(string value);
        public string ToString();
    }
}

namespace System.Threading
{
    public struct CancellationToken
    {
        public bool IsCancellationRequested { get; }
        public void ThrowIfCancellationRequested();
    }
}

namespace System.Threading.Tasks
{
    public class Task : IDisposable
    {
        public static Task CompletedTask { get; }
        public bool IsCompleted { get; }
        public static Task<TResult> FromResult<TResult>(TResult result);
        public static Task WhenAll(IEnumerable<Task> tasks);
        public static Task WhenAll(params Task[] tasks);
        public static Task<TResult[]> WhenAll<TResult>(IEnumerable<Task<TResult>> tasks);
        public static Task Delay(int millisecondsDelay);
        public static Task Run(Action action);
        public static Task<TResult> Run<TResult>(Func<TResult> function);
        public void Wait();
        public void Dispose();
    }

    public class Task<TResult> : Task
    {
        public TResult Result { get; }
    }
}

namespace System.IO
{
    public class Stream : IDisposable
    {
        public void Dispose();
    }

    public class TextReader : IDisposable
    {
        public string ReadLine();
        public string ReadToEnd();
        public void Dispose();
    }

    public class StreamReader : TextReader
    {
        public StreamReader(string path);
        public StreamReader(Stream stream);
    }

    public static class File
    {
        public static bool Exists(string path);
        public static string ReadAllText(string path);
        public static void WriteAllText(string path, string contents);
    }
}
"#;

static LIBRARY: Lazy<SymbolTable> = Lazy::new(build);

/// The shared library table.
pub fn table() -> &'static SymbolTable {
    &LIBRARY
}

fn build() -> SymbolTable {
    let mut table = SymbolTable::new();
    match sharpfix_cst::parse(LIBRARY_SOURCE) {
        Ok(tree) => declarations::declare_library(&mut table, tree.root()),
        Err(err) => error!(offset = err.offset, message = %err.message, "reference library failed to parse"),
    }
    table
}

/// Types the binder refers to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnown {
    Object,
    String,
    Boolean,
    Char,
    Byte,
    Int16,
    Int32,
    Int64,
    UInt32,
    UInt64,
    Single,
    Double,
    Decimal,
    Array,
    Delegate,
    Exception,
    IEnumerableOfT,
    Task,
    TaskOfT,
}

impl WellKnown {
    fn path(self) -> (&'static str, usize) {
        match self {
            WellKnown::Object => ("System.Object", 0),
            WellKnown::String => ("System.String", 0),
            WellKnown::Boolean => ("System.Boolean", 0),
            WellKnown::Char => ("System.Char", 0),
            WellKnown::Byte => ("System.Byte", 0),
            WellKnown::Int16 => ("System.Int16", 0),
            WellKnown::Int32 => ("System.Int32", 0),
            WellKnown::Int64 => ("System.Int64", 0),
            WellKnown::UInt32 => ("System.UInt32", 0),
            WellKnown::UInt64 => ("System.UInt64", 0),
            WellKnown::Single => ("System.Single", 0),
            WellKnown::Double => ("System.Double", 0),
            WellKnown::Decimal => ("System.Decimal", 0),
            WellKnown::Array => ("System.Array", 0),
            WellKnown::Delegate => ("System.Delegate", 0),
            WellKnown::Exception => ("System.Exception", 0),
            WellKnown::IEnumerableOfT => ("System.Collections.Generic.IEnumerable", 1),
            WellKnown::Task => ("System.Threading.Tasks.Task", 0),
            WellKnown::TaskOfT => ("System.Threading.Tasks.Task", 1),
        }
    }

    /// The library symbol for this type.
    pub fn symbol(self, table: &SymbolTable) -> Option<SymbolId> {
        let (path, arity) = self.path();
        table.type_by_path(path, arity)
    }

    /// Keyword spelling of a built-in type, e.g. `int` for `System.Int32`.
    pub fn keyword(self) -> Option<&'static str> {
        Some(match self {
            WellKnown::Object => "object",
            WellKnown::String => "string",
            WellKnown::Boolean => "bool",
            WellKnown::Char => "char",
            WellKnown::Byte => "byte",
            WellKnown::Int16 => "short",
            WellKnown::Int32 => "int",
            WellKnown::Int64 => "long",
            WellKnown::UInt32 => "uint",
            WellKnown::UInt64 => "ulong",
            WellKnown::Single => "float",
            WellKnown::Double => "double",
            WellKnown::Decimal => "decimal",
            _ => return None,
        })
    }

    /// The built-in type named by a keyword.
    pub fn from_keyword(keyword: &str) -> Option<WellKnown> {
        Some(match keyword {
            "object" => WellKnown::Object,
            "string" => WellKnown::String,
            "bool" => WellKnown::Boolean,
            "char" => WellKnown::Char,
            "byte" => WellKnown::Byte,
            "short" => WellKnown::Int16,
            "int" => WellKnown::Int32,
            "long" => WellKnown::Int64,
            "uint" => WellKnown::UInt32,
            "ulong" => WellKnown::UInt64,
            "float" => WellKnown::Single,
            "double" => WellKnown::Double,
            "decimal" => WellKnown::Decimal,
            _ => return None,
        })
    }

    pub const KEYWORD_TYPES: [WellKnown; 13] = [
        WellKnown::Object,
        WellKnown::String,
        WellKnown::Boolean,
        WellKnown::Char,
        WellKnown::Byte,
        WellKnown::Int16,
        WellKnown::Int32,
        WellKnown::Int64,
        WellKnown::UInt32,
        WellKnown::UInt64,
        WellKnown::Single,
        WellKnown::Double,
        WellKnown::Decimal,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::symbols::SymbolKind;

    #[test]
    fn library_source_parses() {
        assert!(sharpfix_cst::parse(LIBRARY_SOURCE).is_ok());
    }

    #[test]
    fn well_known_types_are_declared() {
        let table = table();
        for well_known in WellKnown::KEYWORD_TYPES {
            assert!(well_known.symbol(table).is_some(), "{well_known:?}");
        }
        let task = WellKnown::Task.symbol(table).unwrap();
        let task_of = WellKnown::TaskOfT.symbol(table).unwrap();
        assert_ne!(task, task_of);
        assert_eq!(table.get(task_of).bases.first().and_then(|b| b.symbol()), Some(task));
    }

    #[test]
    fn library_symbols_have_no_declaration() {
        let table = table();
        let math = table.type_by_path("System.Math", 0).unwrap();
        let symbol = table.get(math);
        assert!(symbol.is_from_library());
        assert!(symbol.is_static());
        let max = table.members_named(math, "Max");
        assert_eq!(max.len(), 1);
        assert_eq!(table.get(max[0]).kind, SymbolKind::Method);
    }

    #[test]
    fn delegates_have_invoke() {
        let table = table();
        let func = table.type_by_path("System.Func", 2).unwrap();
        let invoke = table.members_named(func, "Invoke");
        assert_eq!(invoke.len(), 1);
        assert_eq!(table.get(invoke[0]).parameters.len(), 1);
    }

    #[test]
    fn keywords_map_both_ways() {
        for well_known in WellKnown::KEYWORD_TYPES {
            let keyword = well_known.keyword().unwrap();
            assert_eq!(WellKnown::from_keyword(keyword), Some(well_known));
        }
    }
}
